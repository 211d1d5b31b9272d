use anyhow::{anyhow, Result};
use std::collections::HashSet;

/// Telegram user ids allowed to run admin-only commands.
///
/// Parsed once at startup from a comma-separated list such as `"123, 456"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList {
    ids: HashSet<u64>,
}

impl AdminAllowList {
    pub fn parse(raw: &str) -> Result<Self> {
        let mut ids = HashSet::new();

        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let id = part
                .parse::<u64>()
                .map_err(|_| anyhow!("Invalid ADMIN_IDS entry '{}': expected a numeric user id", part))?;
            ids.insert(id);
        }

        Ok(Self { ids })
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
