use chrono::Weekday;
use teloxide::prelude::*;

use crate::bot::{AppContext, Caller};
use crate::utils::{
    datetime::{weekday_label, weekday_name},
    feedback::CommandFeedback,
    formatting::{custom_schedule_message, empty_custom_list, no_custom_anime_for_day, schedule_message},
    logging::{log_command_error, log_command_success, log_validation_error},
    validation::parse_day_argument,
};

/// Sends the full schedule for one day. `label` is the header text, e.g. "Today".
pub async fn handle_day_schedule(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    command: &str,
    day: Weekday,
    label: &str,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let processing_msg = feedback.send_processing("Fetching anime schedule...").await?;

    let list = match app.schedule.anime_by_day(day).await {
        Ok(list) => list,
        Err(e) => {
            log_command_error(command, &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            feedback.delete_quietly(processing_msg.id).await;
            feedback.error("Error fetching anime schedule. Please try again later.").await?;
            return Ok(());
        }
    };

    let sent = feedback.send_listing(&schedule_message(label, &list), &app.list_image).await;
    feedback.delete_quietly(processing_msg.id).await;
    sent?;

    log_command_success(
        command,
        &caller.username,
        caller.user_id,
        caller.chat_id,
        Some(&format!("{} titles for {}", list.len(), weekday_name(day))),
    );
    Ok(())
}

/// Sends the caller's custom-list titles airing on the day named in `day_arg`.
pub async fn handle_custom_day(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    day_arg: &str,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let day = match parse_day_argument(day_arg) {
        Ok(day) => day,
        Err(e) => {
            log_validation_error("/cday", "day", day_arg, &e.to_string(), &caller.username, caller.user_id, caller.chat_id);
            feedback.validation_error(&e.to_string(), "Example: /cday sunday").await?;
            return Ok(());
        }
    };
    let label = weekday_label(day);
    let list_key = caller.list_key();

    // Nothing to intersect with, so skip the upstream request
    if app.lists.get_user_list(&list_key).await.is_empty() {
        feedback.send_html(&empty_custom_list()).await?;
        log_command_success("/cday", &caller.username, caller.user_id, caller.chat_id, Some("custom list empty"));
        return Ok(());
    }

    let processing_msg = feedback.send_processing("Fetching your custom anime schedule...").await?;

    let schedule = match app.schedule.anime_by_day(day).await {
        Ok(list) => list,
        Err(e) => {
            log_command_error("/cday", &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            feedback.delete_quietly(processing_msg.id).await;
            feedback.error("Error fetching custom anime schedule. Please try again later.").await?;
            return Ok(());
        }
    };

    let custom = app.lists.filter_by_custom_list(&list_key, schedule).await;

    let sent = if custom.is_empty() {
        feedback.send_html(&no_custom_anime_for_day(label)).await.map(|_| ())
    } else {
        feedback
            .send_listing(&custom_schedule_message(label, &custom), &app.list_image)
            .await
    };
    feedback.delete_quietly(processing_msg.id).await;
    sent?;

    log_command_success(
        "/cday",
        &caller.username,
        caller.user_id,
        caller.chat_id,
        Some(&format!("{} matching titles for {}", custom.len(), weekday_name(day))),
    );
    Ok(())
}
