use crate::{Category, LedgerError, Message};

/// Default per-category ceiling.
pub const DEFAULT_CAPACITY: usize = 100;

/// In-memory collection of all messages across the three categories.
///
/// Each category is an ordered sequence; insertion order is preserved within
/// a category, including after deletion. The capacity is a hard ceiling:
/// inserts beyond it are rejected, never evicted around.
///
/// Known limitation: only the sent collection is searchable by id or hash;
/// stored and disregarded messages are reachable
/// through the recipient search and the borrow accessors only.
pub struct MessageLedger {
    sent: Vec<Message>,
    stored: Vec<Message>,
    disregarded: Vec<Message>,
    capacity: usize,
}

impl Default for MessageLedger {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl MessageLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            sent: Vec::new(),
            stored: Vec::new(),
            disregarded: Vec::new(),
            capacity,
        }
    }

    fn collection_mut(&mut self, category: Category) -> &mut Vec<Message> {
        match category {
            Category::Sent => &mut self.sent,
            Category::Stored => &mut self.stored,
            Category::Disregarded => &mut self.disregarded,
        }
    }

    /// Append a message to the collection matching its own category.
    /// A full collection rejects the message with no state change.
    pub fn insert(&mut self, message: Message) -> Result<(), LedgerError> {
        let category = message.get_message_type();
        let capacity = self.capacity;
        let collection = self.collection_mut(category);
        if collection.len() >= capacity {
            return Err(LedgerError::CapacityExceeded { category, capacity });
        }
        collection.push(message);
        Ok(())
    }

    /// Linear scan over the sent collection only.
    pub fn find_by_id(&self, id: &str) -> Option<&Message> {
        self.sent.iter().find(|m| m.get_message_id() == id)
    }

    /// Linear scan over the sent collection only.
    pub fn find_by_hash(&self, hash: &str) -> Option<&Message> {
        self.sent.iter().find(|m| m.get_message_hash() == hash)
    }

    /// Remove the sent message with the given hash and return it. Survivors
    /// keep their relative order (`Vec::remove` shifts left) and the count
    /// drops by exactly one.
    pub fn delete_by_hash(&mut self, hash: &str) -> Result<Message, LedgerError> {
        match self.sent.iter().position(|m| m.get_message_hash() == hash) {
            Some(index) => Ok(self.sent.remove(index)),
            None => Err(LedgerError::NotFound),
        }
    }

    /// The only legal category transition after creation: move a sent message
    /// to disregarded. The sent collection compacts; nothing is mutated on a
    /// miss or when disregarded is already full.
    pub fn disregard_sent(&mut self, hash: &str) -> Result<(), LedgerError> {
        if self.disregarded.len() >= self.capacity {
            return Err(LedgerError::CapacityExceeded {
                category: Category::Disregarded,
                capacity: self.capacity,
            });
        }
        let mut message = self.delete_by_hash(hash)?;
        message.set_message_type(Category::Disregarded);
        self.disregarded.push(message);
        Ok(())
    }

    /// All sent and stored messages addressed to `recipient`, each tagged
    /// with its origin category. Disregarded messages are excluded by design.
    pub fn find_by_recipient(&self, recipient: &str) -> Vec<(&Message, Category)> {
        let mut matches = Vec::new();
        for m in &self.sent {
            if m.get_recipient() == recipient {
                matches.push((m, Category::Sent));
            }
        }
        for m in &self.stored {
            if m.get_recipient() == recipient {
                matches.push((m, Category::Stored));
            }
        }
        matches
    }

    /// First sent message achieving the maximum body length; ties keep the
    /// earliest.
    pub fn longest_message(&self) -> Option<&Message> {
        let mut longest: Option<&Message> = None;
        for m in &self.sent {
            let beats = longest
                .map_or(true, |l| m.get_message().chars().count() > l.get_message().chars().count());
            if beats {
                longest = Some(m);
            }
        }
        longest
    }

    /// Partition persisted messages into their categories, preserving ids and
    /// hashes verbatim. Records beyond a collection's capacity are dropped;
    /// the loss is reported once as a warning, matching the historically
    /// lossy behaviour rather than papering over it.
    pub fn hydrate(&mut self, messages: Vec<Message>) {
        let mut dropped = 0usize;
        for message in messages {
            if self.insert(message).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("ledger at capacity during hydration, dropped {dropped} persisted message(s)");
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn sent_count(&self) -> usize {
        self.sent.len()
    }

    pub fn stored_count(&self) -> usize {
        self.stored.len()
    }

    pub fn disregarded_count(&self) -> usize {
        self.disregarded.len()
    }

    pub fn sent_messages(&self) -> &[Message] {
        &self.sent
    }

    pub fn stored_messages(&self) -> &[Message] {
        &self.stored
    }

    pub fn disregarded_messages(&self) -> &[Message] {
        &self.disregarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sent(recipient: &str, body: &str, message_number: usize) -> Message {
        Message::new(recipient.to_string(), body.to_string(), message_number)
    }

    fn with_category(recipient: &str, body: &str, message_number: usize, category: Category) -> Message {
        let mut m = sent(recipient, body, message_number);
        m.set_message_type(category);
        m
    }

    #[test]
    fn insert_routes_by_category() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27834557896", "Did you get the cake?", 0)).unwrap();
        ledger
            .insert(with_category("+27838884567", "Where are you? You are late!", 1, Category::Stored))
            .unwrap();
        ledger
            .insert(with_category("+27834484567", "Yohoooo, I am at your gate.", 2, Category::Disregarded))
            .unwrap();

        assert_eq!(ledger.sent_count(), 1);
        assert_eq!(ledger.stored_count(), 1);
        assert_eq!(ledger.disregarded_count(), 1);
    }

    #[test]
    fn insert_at_capacity_is_rejected_without_mutation() {
        let mut ledger = MessageLedger::new(2);
        ledger.insert(sent("+27718693002", "one", 0)).unwrap();
        ledger.insert(sent("+27718693002", "two", 1)).unwrap();

        let err = ledger.insert(sent("+27718693002", "three", 2)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::CapacityExceeded { category: Category::Sent, capacity: 2 }
        );
        assert_eq!(ledger.sent_count(), 2);
        assert_eq!(ledger.sent_messages()[1].get_message(), "two");
    }

    #[test]
    fn delete_by_hash_compacts_and_preserves_order() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27718693002", "first", 0)).unwrap();
        ledger.insert(sent("+27718693002", "second", 1)).unwrap();
        ledger.insert(sent("+27718693002", "third", 2)).unwrap();

        let target = ledger.sent_messages()[1].get_message_hash().to_string();
        let removed = ledger.delete_by_hash(&target).unwrap();

        assert_eq!(removed.get_message(), "second");
        assert_eq!(ledger.sent_count(), 2);
        assert!(ledger.find_by_hash(&target).is_none());
        assert_eq!(ledger.sent_messages()[0].get_message(), "first");
        assert_eq!(ledger.sent_messages()[1].get_message(), "third");
    }

    #[test]
    fn delete_by_hash_miss_leaves_state_unchanged() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27718693002", "only", 0)).unwrap();

        assert_eq!(ledger.delete_by_hash("ZZ:9:NOPE"), Err(LedgerError::NotFound));
        assert_eq!(ledger.sent_count(), 1);
    }

    #[test]
    fn lookup_covers_sent_only() {
        let mut ledger = MessageLedger::default();
        let stored = with_category("+27838884567", "kept aside", 0, Category::Stored);
        let stored_id = stored.get_message_id().to_string();
        let stored_hash = stored.get_message_hash().to_string();
        ledger.insert(stored).unwrap();

        assert!(ledger.find_by_id(&stored_id).is_none());
        assert!(ledger.find_by_hash(&stored_hash).is_none());
        assert_eq!(ledger.stored_count(), 1);
    }

    #[test]
    fn find_by_id_matches_sent_message() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27834557896", "Did you get the cake?", 0)).unwrap();
        let id = ledger.sent_messages()[0].get_message_id().to_string();

        let found = ledger.find_by_id(&id).unwrap();
        assert_eq!(found.get_recipient(), "+27834557896");
        assert!(ledger.find_by_id("not-an-id").is_none());
    }

    #[test]
    fn recipient_search_tags_origin_and_skips_disregarded() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27834557896", "from sent", 0)).unwrap();
        ledger
            .insert(with_category("+27834557896", "from stored", 1, Category::Stored))
            .unwrap();
        ledger
            .insert(with_category("+27834557896", "from disregarded", 2, Category::Disregarded))
            .unwrap();
        ledger.insert(sent("+27999999999", "other recipient", 3)).unwrap();

        let matches = ledger.find_by_recipient("+27834557896");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].0.get_message(), "from sent");
        assert_eq!(matches[0].1, Category::Sent);
        assert_eq!(matches[1].0.get_message(), "from stored");
        assert_eq!(matches[1].1, Category::Stored);
    }

    #[test]
    fn longest_message_keeps_earliest_on_ties() {
        let mut ledger = MessageLedger::default();
        assert!(ledger.longest_message().is_none());

        ledger.insert(sent("+27718693002", "aaaa", 0)).unwrap();
        ledger.insert(sent("+27718693002", "bb", 1)).unwrap();
        ledger.insert(sent("+27718693002", "cccc", 2)).unwrap();

        assert_eq!(ledger.longest_message().unwrap().get_message(), "aaaa");
    }

    #[test]
    fn disregard_sent_moves_and_flips_category() {
        let mut ledger = MessageLedger::default();
        ledger.insert(sent("+27718693002", "changed my mind", 0)).unwrap();
        let hash = ledger.sent_messages()[0].get_message_hash().to_string();

        ledger.disregard_sent(&hash).unwrap();

        assert_eq!(ledger.sent_count(), 0);
        assert_eq!(ledger.disregarded_count(), 1);
        let moved = &ledger.disregarded_messages()[0];
        assert_eq!(moved.get_message_type(), Category::Disregarded);
        assert_eq!(moved.get_message_hash(), hash);
    }

    #[test]
    fn disregard_sent_misses_cleanly() {
        let mut ledger = MessageLedger::default();
        assert_eq!(ledger.disregard_sent("12:0:NANA"), Err(LedgerError::NotFound));
    }

    #[test]
    fn hydrate_partitions_and_drops_overflow() {
        let mut ledger = MessageLedger::new(1);
        let messages = vec![
            sent("+27834557896", "first sent", 0),
            sent("+27834557896", "second sent overflows", 1),
            with_category("+27838884567", "kept", 2, Category::Stored),
        ];

        ledger.hydrate(messages);

        assert_eq!(ledger.sent_count(), 1);
        assert_eq!(ledger.sent_messages()[0].get_message(), "first sent");
        assert_eq!(ledger.stored_count(), 1);
    }
}
