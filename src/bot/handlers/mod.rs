pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::bot::commands::Command;
use crate::bot::AppContext;

pub struct BotHandler {
    pub app: Arc<AppContext>,
}

impl BotHandler {
    pub fn new(app: Arc<AppContext>) -> Self {
        Self { app }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let app = self.app.clone();

        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let app = app.clone();
                        async move { message::command_handler(bot, msg, cmd, app).await }
                    }),
            )
            .branch(dptree::endpoint(general_message::handle_general_message))
    }
}
