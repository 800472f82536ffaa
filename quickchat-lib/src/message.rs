use rand::Rng;

/// Mutually exclusive handling outcome of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sent,
    Stored,
    Disregarded,
}

impl Default for Category {
    fn default() -> Self {
        Category::Sent
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Category::Sent => "sent",
            Category::Stored => "stored",
            Category::Disregarded => "disregarded",
        })
    }
}

/// One QuickChat message: random 10-digit id, derived hash, payload and
/// delivery flags. The hash is computed once at construction and is never
/// invalidated by later category changes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Message {
    message_id: String,
    recipient: String,
    message: String,
    message_hash: String,
    message_type: Category,
    is_sent: bool,
    is_received: bool,
    is_read: bool,
}

/// Generate a random 10-digit numeric id. Uniform, not cryptographic;
/// collisions are astronomically unlikely at this scale and go unchecked.
pub fn generate_message_id() -> String {
    let mut rng = rand::thread_rng();
    (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
}

/// Derive the short human-facing hash `UU:N:FIRSTLAST`: first two id
/// characters, the caller-supplied zero-based message number, and the
/// alphanumeric-stripped first and last whitespace-delimited words of the
/// body, all upper-cased. No words gives `NANA`; a single word keeps `NA`
/// as the second half.
pub fn create_message_hash(id: &str, message_number: usize, message: &str) -> String {
    fn strip(word: &str) -> String {
        word.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
    }

    let words: Vec<&str> = message.split_whitespace().collect();
    let first = match words.first() {
        Some(word) => strip(word),
        None => "NA".to_string(),
    };
    let last = match words.len() {
        0 | 1 => "NA".to_string(),
        n => strip(words[n - 1]),
    };
    let prefix = id.get(..2).unwrap_or(id);
    format!("{prefix}:{message_number}:{first}{last}").to_uppercase()
}

impl Message {
    /// Build a fresh message straight from user input. The category defaults
    /// to `sent` and all three flags start true (construction implies
    /// already-sent semantics, kept from the historical behaviour).
    pub fn new(recipient: String, message: String, message_number: usize) -> Self {
        let message_id = generate_message_id();
        let message_hash = create_message_hash(&message_id, message_number, &message);
        Self {
            message_id,
            recipient,
            message,
            message_hash,
            message_type: Category::Sent,
            is_sent: true,
            is_received: true,
            is_read: true,
        }
    }

    /// Rebuild a message from persisted fields. Id and hash are taken
    /// verbatim, never regenerated, so historically persisted hashes survive
    /// hydration.
    pub fn from_stored(
        message_id: String,
        message_hash: String,
        recipient: String,
        message: String,
        message_type: Category,
    ) -> Self {
        Self {
            message_id,
            recipient,
            message,
            message_hash,
            message_type,
            is_sent: true,
            is_received: true,
            is_read: true,
        }
    }

    pub fn get_message_id(&self) -> &str {
        &self.message_id
    }

    pub fn get_recipient(&self) -> &str {
        &self.recipient
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    pub fn get_message_hash(&self) -> &str {
        &self.message_hash
    }

    pub fn get_message_type(&self) -> Category {
        self.message_type
    }

    pub fn set_message_type(&mut self, message_type: Category) {
        self.message_type = message_type;
    }

    pub fn is_sent(&self) -> bool {
        self.is_sent
    }

    pub fn is_received(&self) -> bool {
        self.is_received
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn mark_as_sent(&mut self) {
        self.is_sent = true;
    }

    pub fn mark_as_received(&mut self) {
        self.is_received = true;
    }

    pub fn mark_as_read(&mut self) {
        self.is_read = true;
    }

    /// Multi-line human-readable dump used by reports; not machine-parsed.
    pub fn print_details(&self) -> String {
        format!(
            "Message ID: {}\nMessage Hash: {}\nRecipient: {}\nMessage: {}\nSent: {}\nReceived: {}\nRead: {}",
            self.message_id,
            self.message_hash,
            self.recipient,
            self.message,
            self.is_sent,
            self.is_received,
            self.is_read
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_is_ten_decimal_digits() {
        let id = generate_message_id();
        assert_eq!(id.len(), 10);
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(generate_message_id(), generate_message_id());
    }

    #[test]
    fn hash_keeps_first_and_last_word_only() {
        let hash = create_message_hash("1234567890", 0, "Hi Mike, let's meet tonight");
        assert_eq!(hash, "12:0:HITONIGHT");
    }

    #[test]
    fn hash_strips_punctuation_from_kept_words() {
        let hash = create_message_hash("9876543210", 3, "Yohoooo, I am at your gate.");
        assert_eq!(hash, "98:3:YOHOOOOGATE");
    }

    #[test]
    fn hash_single_word_uses_na_second_half() {
        assert_eq!(create_message_hash("5555555555", 1, "Hello"), "55:1:HELLONA");
    }

    #[test]
    fn hash_empty_body_uses_na_both_halves() {
        assert_eq!(create_message_hash("5555555555", 2, "   "), "55:2:NANA");
    }

    #[test]
    fn constructor_assigns_fields_and_defaults() {
        let m = Message::new("+27830000000".to_string(), "Hello".to_string(), 1);
        assert_eq!(m.get_recipient(), "+27830000000");
        assert_eq!(m.get_message(), "Hello");
        assert_eq!(m.get_message_type(), Category::Sent);
        assert_eq!(m.get_message_id().len(), 10);
        assert_eq!(
            m.get_message_hash(),
            create_message_hash(m.get_message_id(), 1, "Hello")
        );
        assert!(m.is_sent());
        assert!(m.is_received());
        assert!(m.is_read());
    }

    #[test]
    fn mark_as_sent_is_idempotent() {
        let mut m = Message::new("+27834567890".to_string(), "Send flag test".to_string(), 1);
        m.mark_as_sent();
        let once = m.clone();
        m.mark_as_sent();
        assert!(m.is_sent());
        assert_eq!(m.print_details(), once.print_details());
    }

    #[test]
    fn category_change_does_not_touch_hash() {
        let mut m = Message::new("+27834567890".to_string(), "Hello again".to_string(), 2);
        let hash = m.get_message_hash().to_string();
        m.set_message_type(Category::Disregarded);
        assert_eq!(m.get_message_hash(), hash);
        assert_eq!(m.get_message_type(), Category::Disregarded);
    }

    #[test]
    fn print_details_echoes_all_flags() {
        let m = Message::new("+27834567890".to_string(), "Test print details".to_string(), 1);
        let details = m.print_details();
        assert!(details.contains("Sent: true"));
        assert!(details.contains("Received: true"));
        assert!(details.contains("Read: true"));
        assert!(details.contains("Recipient: +27834567890"));
    }
}
