pub mod access;
pub mod commands;
pub mod handlers;

use reqwest::Url;
use std::sync::Arc;
use teloxide::types::Message;

use crate::bot::access::AdminAllowList;
use crate::services::custom_list::CustomListStore;
use crate::services::schedule::ScheduleAggregator;

/// Everything command handlers need, shared across updates.
pub struct AppContext {
    pub schedule: ScheduleAggregator,
    pub lists: Arc<CustomListStore>,
    pub admins: AdminAllowList,
    pub start_image: Url,
    pub list_image: Url,
}

/// Who sent a command, for logging and list ownership.
#[derive(Debug, Clone)]
pub struct Caller {
    pub username: String,
    pub user_id: u64,
    pub chat_id: i64,
}

impl Caller {
    pub fn from_message(msg: &Message) -> Self {
        let user = msg.from();
        Self {
            username: user
                .and_then(|u| u.username.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            user_id: user.map(|u| u.id.0).unwrap_or(0),
            chat_id: msg.chat.id.0,
        }
    }

    /// Key of this caller's custom list.
    pub fn list_key(&self) -> String {
        self.user_id.to_string()
    }
}
