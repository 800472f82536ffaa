use std::io::{BufRead, Write};

use quickchat_lib::{
    check_cellphone, check_password_complexity, check_recipient_cell, check_username,
    validate_message_length, Account, Category, Message, MessageLedger, MessageStore,
};

/// Sequential prompt-driven session over any `BufRead`/`Write` pair, so the
/// whole flow runs against in-memory buffers in tests.
pub struct App {
    account: Option<Account>,
    ledger: MessageLedger,
    store: MessageStore,
}

impl App {
    pub fn new(capacity: usize, store: MessageStore) -> Self {
        Self {
            account: None,
            ledger: MessageLedger::new(capacity),
            store,
        }
    }

    /// Load the persisted store into the ledger once at startup. Read
    /// failures leave the session running on in-memory state only.
    pub fn hydrate_from_store(&mut self) {
        match self.store.read_all() {
            Ok(messages) => {
                if !messages.is_empty() {
                    log::info!("loaded {} persisted message(s)", messages.len());
                }
                self.ledger.hydrate(messages);
            }
            Err(err) => log::warn!("could not read message store: {err}"),
        }
    }

    /// Full session: registration, one login attempt, then the main menu on
    /// success.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(output, "Welcome to QuickChat Registration")?;
        let account = self.register(input, output)?;

        writeln!(output, "Please log in")?;
        let username = prompt(input, output, "Username:")?;
        let password = prompt(input, output, "Password:")?;
        let logged_in = account.login(&username, &password);
        writeln!(output, "{}", account.login_status_message(logged_in))?;

        if logged_in {
            self.account = Some(account);
            self.main_menu(input, output)?;
        }
        Ok(())
    }

    fn register(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<Account> {
        let first_name = prompt(input, output, "Enter your first name:")?;
        let last_name = prompt(input, output, "Enter your last name:")?;
        let username = prompt_until_valid(
            input,
            output,
            "Enter username (must contain _ and be <= 5 chars):",
            check_username,
            "Invalid username format.",
        )?;
        let password = prompt_until_valid(
            input,
            output,
            "Enter password (8+ chars, 1 capital, 1 number, 1 special):",
            check_password_complexity,
            "Invalid password format.",
        )?;
        let cellphone = prompt_until_valid(
            input,
            output,
            "Enter cellphone number (+27XXXXXXXXX):",
            check_cellphone,
            "Invalid cellphone number.",
        )?;

        let account = Account::new(username, password, cellphone, first_name, last_name);
        let feedback = match account.register() {
            Ok(feedback) => feedback,
            Err(err) => err.to_string(),
        };
        writeln!(output, "{feedback}")?;
        Ok(account)
    }

    pub fn main_menu(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        loop {
            let option = prompt(
                input,
                output,
                "Welcome to QuickChat!\n\nChoose an option:\n1) Send Message\n2) Show Recently Sent Messages\n3) Disregard Message/Quit\n4) Reports",
            )?;
            match option.as_str() {
                "1" => self.send_batch(input, output)?,
                "2" => {
                    if self.ledger.sent_count() == 0 {
                        writeln!(output, "No messages sent yet.")?;
                    } else {
                        self.full_report(output)?;
                    }
                }
                "3" => {
                    let hash = prompt(
                        input,
                        output,
                        "Enter a message hash to disregard, or press Enter to quit:",
                    )?;
                    if hash.is_empty() {
                        break;
                    }
                    match self.ledger.disregard_sent(&hash) {
                        Ok(()) => writeln!(output, "Message disregarded.")?,
                        Err(err) => writeln!(output, "{err}")?,
                    }
                }
                "4" => self.reports_menu(input, output)?,
                _ => writeln!(output, "Invalid option. Please choose 1, 2, 3, or 4.")?,
            }
        }
        Ok(())
    }

    fn send_batch(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        let total: usize = match prompt(input, output, "How many messages would you like to send?")?.parse() {
            Ok(total) => total,
            Err(_) => {
                writeln!(output, "Invalid number.")?;
                return Ok(());
            }
        };
        for message_number in 0..total {
            if !self.send_message(input, output, message_number)? {
                writeln!(output, "Message not sent. Skipping...")?;
            }
        }
        writeln!(output, "Total messages processed: {}", self.ledger.sent_count())?;
        Ok(())
    }

    fn send_message(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
        message_number: usize,
    ) -> anyhow::Result<bool> {
        let recipient = prompt(input, output, "Enter recipient phone number (e.g., +27834567890):")?;
        if !check_recipient_cell(&recipient) {
            writeln!(output, "Cell phone number is incorrectly formatted.")?;
            return Ok(false);
        }

        let content = prompt(input, output, "Enter your message (max 250 characters):")?;
        let check = validate_message_length(&content);
        writeln!(output, "{}", check.feedback())?;
        if !check.is_ready() {
            return Ok(false);
        }

        let mut message = Message::new(recipient, content, message_number);
        writeln!(
            output,
            "Message #{}\nMessage Hash: {}",
            message_number + 1,
            message.get_message_hash()
        )?;

        let action = prompt(
            input,
            output,
            "What would you like to do with this message?\n1) Send\n2) Discard\n3) Store",
        )?;
        match action.as_str() {
            "1" => {
                let details = message.print_details();
                match self.ledger.insert(message) {
                    Ok(()) => {
                        self.persist_last_sent();
                        writeln!(output, "{details}")?;
                        Ok(true)
                    }
                    Err(err) => {
                        writeln!(output, "{err}")?;
                        Ok(false)
                    }
                }
            }
            "2" => {
                message.set_message_type(Category::Disregarded);
                match self.ledger.insert(message) {
                    Ok(()) => {
                        writeln!(output, "Message discarded.")?;
                        Ok(true)
                    }
                    Err(err) => {
                        writeln!(output, "{err}")?;
                        Ok(false)
                    }
                }
            }
            "3" => {
                message.set_message_type(Category::Stored);
                if let Err(err) = self.store.append(&message) {
                    log::warn!("could not persist message: {err}");
                }
                match self.ledger.insert(message) {
                    Ok(()) => {
                        writeln!(output, "Message successfully stored.")?;
                        Ok(true)
                    }
                    Err(err) => {
                        writeln!(output, "{err}")?;
                        Ok(false)
                    }
                }
            }
            _ => {
                writeln!(output, "Invalid option.")?;
                Ok(false)
            }
        }
    }

    fn persist_last_sent(&self) {
        if let Some(message) = self.ledger.sent_messages().last() {
            if let Err(err) = self.store.append(message) {
                log::warn!("could not persist message: {err}");
            }
        }
    }

    fn reports_menu(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        let option = prompt(
            input,
            output,
            "Reports Menu:\n1) Show Sender & Recipients\n2) Longest Message\n3) Search by Message ID\n4) Search by Recipient\n5) Delete by Message Hash\n6) Full Sent Report",
        )?;
        match option.as_str() {
            "1" => {
                writeln!(output, "Sent Messages:")?;
                if let Some(account) = &self.account {
                    writeln!(output, "Sender: {}", account.get_username())?;
                }
                for message in self.ledger.sent_messages() {
                    writeln!(
                        output,
                        "Message ID: {}\nRecipient: {}\nMessage: {}\n",
                        message.get_message_id(),
                        message.get_recipient(),
                        message.get_message()
                    )?;
                }
            }
            "2" => match self.ledger.longest_message() {
                Some(message) => writeln!(output, "Longest message:\n{}", message.get_message())?,
                None => writeln!(output, "No messages sent yet.")?,
            },
            "3" => {
                let id = prompt(input, output, "Enter Message ID:")?;
                match self.ledger.find_by_id(&id) {
                    Some(message) => writeln!(
                        output,
                        "Recipient: {}\nMessage: {}",
                        message.get_recipient(),
                        message.get_message()
                    )?,
                    None => writeln!(output, "Message ID not found.")?,
                }
            }
            "4" => {
                let recipient = prompt(input, output, "Enter Recipient:")?;
                let matches = self.ledger.find_by_recipient(&recipient);
                if matches.is_empty() {
                    writeln!(output, "No messages found.")?;
                } else {
                    writeln!(output, "Messages sent/stored to {recipient}:")?;
                    for (message, origin) in matches {
                        match origin {
                            Category::Stored => writeln!(output, "- {} (stored)", message.get_message())?,
                            _ => writeln!(output, "- {}", message.get_message())?,
                        }
                    }
                }
            }
            "5" => {
                let hash = prompt(input, output, "Enter Message Hash:")?;
                match self.ledger.delete_by_hash(&hash) {
                    Ok(message) => writeln!(
                        output,
                        "Message \"{}\" successfully deleted.",
                        message.get_message()
                    )?,
                    Err(err) => writeln!(output, "{err}")?,
                }
            }
            "6" => self.full_report(output)?,
            _ => writeln!(output, "Invalid report option.")?,
        }
        Ok(())
    }

    fn full_report(&self, output: &mut impl Write) -> anyhow::Result<()> {
        writeln!(output, "Full Sent Messages Report:\n")?;
        for message in self.ledger.sent_messages() {
            writeln!(
                output,
                "Message Hash: {}\nRecipient: {}\nMessage: {}\n",
                message.get_message_hash(),
                message.get_recipient(),
                message.get_message()
            )?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn ledger(&self) -> &MessageLedger {
        &self.ledger
    }
}

fn prompt(input: &mut impl BufRead, output: &mut impl Write, label: &str) -> anyhow::Result<String> {
    writeln!(output, "{label}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("input closed");
    }
    Ok(line.trim().to_string())
}

fn prompt_until_valid(
    input: &mut impl BufRead,
    output: &mut impl Write,
    label: &str,
    check: impl Fn(&str) -> bool,
    error: &str,
) -> anyhow::Result<String> {
    loop {
        let value = prompt(input, output, label)?;
        if check(&value) {
            return Ok(value);
        }
        writeln!(output, "{error}")?;
    }
}
