use crate::config::Config;

/// Name and email decoded from a git identity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: Option<String>,
}

impl Identity {
    /// Decode `User Name <user@example.com> tstamp offset`.
    ///
    /// The trailing timestamp and UTC offset are dropped. Without a `<` the
    /// whole remainder is taken as the name and no email is reported.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<&str> = raw.split(' ').collect();
        let keep = tokens.len().saturating_sub(2);
        let value = tokens[..keep].join(" ");

        match value.find('<') {
            // A leading `<` leaves an empty name rather than eating into the email.
            Some(angle) => Self {
                name: drop_last_char(&value[..angle]).to_string(),
                email: Some(drop_last_char(&value[angle + 1..]).to_string()),
            },
            None => Self {
                name: value,
                email: None,
            },
        }
    }

    /// Store as `<ROLE>_NAME` and, when known, `<ROLE>_EMAIL`.
    pub fn store(self, cfg: &mut Config, role: &str) {
        cfg.insert(format!("{role}_NAME"), self.name);
        if let Some(email) = self.email {
            cfg.insert(format!("{role}_EMAIL"), email);
        }
    }
}

/// Parse `raw` and record the result under `role` in `cfg`.
pub fn extract_identity(cfg: &mut Config, raw: &str, role: &str) {
    Identity::parse(raw).store(cfg, role);
}

fn drop_last_char(s: &str) -> &str {
    s.char_indices().next_back().map_or(s, |(i, _)| &s[..i])
}
