use chrono::Utc;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{custom_list, schedule, Command};
use crate::bot::{AppContext, Caller};
use crate::utils::{
    datetime::{schedule_today, schedule_tomorrow, weekday_label},
    feedback::CommandFeedback,
    formatting::welcome_message,
    logging::{log_access_denied, log_command_error, log_command_start},
};

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    app: Arc<AppContext>,
) -> HandlerResult {
    let caller = Caller::from_message(&msg);
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    log_command_start(cmd.name(), &caller.username, caller.user_id, caller.chat_id, None);

    if cmd.requires_admin() && !app.admins.is_admin(caller.user_id) {
        log_access_denied(cmd.name(), &caller.username, caller.user_id, caller.chat_id);
        feedback.error("You are not an admin").await?;
        return Ok(());
    }

    let outcome = match &cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
            return Ok(());
        }
        Command::Start => {
            if let Err(e) = feedback.send_photo(&app.start_image, &welcome_message()).await {
                log_command_error("/start", &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            }
            Ok(())
        }
        Command::Today => {
            let day = schedule_today(Utc::now());
            schedule::handle_day_schedule(&bot, &msg, &caller, "/today", day, "Today", &app).await
        }
        Command::Tomorrow => {
            let day = schedule_tomorrow(Utc::now());
            schedule::handle_day_schedule(&bot, &msg, &caller, "/tomorrow", day, "Tomorrow", &app).await
        }
        Command::Sunday
        | Command::Monday
        | Command::Tuesday
        | Command::Wednesday
        | Command::Thursday
        | Command::Friday
        | Command::Saturday => match cmd.weekday() {
            Some(day) => {
                schedule::handle_day_schedule(&bot, &msg, &caller, cmd.name(), day, weekday_label(day), &app).await
            }
            None => Ok(()),
        },
        Command::Cday(day) => schedule::handle_custom_day(&bot, &msg, &caller, day, &app).await,
        Command::AddAnime(title) => custom_list::handle_add_anime(&bot, &msg, &caller, title, &app).await,
        Command::RemoveAnime(title) => {
            custom_list::handle_remove_anime(&bot, &msg, &caller, title, &app).await
        }
        Command::MyList => custom_list::handle_my_list(&bot, &msg, &caller, &app).await,
        Command::ClearList => custom_list::handle_clear_list(&bot, &msg, &caller, &app).await,
    };

    // Deleted even when the reply failed; fails silently without delete rights
    feedback.delete_quietly(msg.id).await;

    if let Err(e) = &outcome {
        log_command_error(cmd.name(), &caller.username, caller.user_id, caller.chat_id, &e.to_string());
    }
    outcome?;
    Ok(())
}
