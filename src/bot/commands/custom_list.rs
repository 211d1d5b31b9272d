use teloxide::prelude::*;

use crate::bot::{AppContext, Caller};
use crate::utils::{
    feedback::CommandFeedback,
    formatting::{
        anime_added, anime_already_listed, anime_not_listed, anime_removed, empty_custom_list,
        format_custom_list, list_already_empty, list_cleared,
    },
    logging::{log_command_error, log_command_success, log_validation_error},
    validation::validate_anime_title,
};

async fn validated_title(
    feedback: &CommandFeedback,
    caller: &Caller,
    command: &str,
    raw: &str,
) -> ResponseResult<Option<String>> {
    match validate_anime_title(raw) {
        Ok(title) => Ok(Some(title)),
        Err(e) => {
            log_validation_error(command, "title", raw, &e.to_string(), &caller.username, caller.user_id, caller.chat_id);
            let suggestion = format!("Example: {command} One Piece");
            feedback.validation_error(&e.to_string(), &suggestion).await?;
            Ok(None)
        }
    }
}

pub async fn handle_add_anime(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    raw_title: &str,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let Some(title) = validated_title(&feedback, caller, "/addanime", raw_title).await? else {
        return Ok(());
    };

    match app.lists.add_anime(&caller.list_key(), &title).await {
        Ok(true) => {
            feedback.send_html(&anime_added(&title)).await?;
            log_command_success("/addanime", &caller.username, caller.user_id, caller.chat_id, Some(&title));
        }
        Ok(false) => {
            feedback.send_html(&anime_already_listed(&title)).await?;
            log_command_success("/addanime", &caller.username, caller.user_id, caller.chat_id, Some("already listed"));
        }
        Err(e) => {
            log_command_error("/addanime", &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            feedback.error("Error adding anime to your list. Please try again.").await?;
        }
    }
    Ok(())
}

pub async fn handle_remove_anime(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    raw_title: &str,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let Some(title) = validated_title(&feedback, caller, "/removeanime", raw_title).await? else {
        return Ok(());
    };

    match app.lists.remove_anime(&caller.list_key(), &title).await {
        Ok(true) => {
            feedback.send_html(&anime_removed(&title)).await?;
            log_command_success("/removeanime", &caller.username, caller.user_id, caller.chat_id, Some(&title));
        }
        Ok(false) => {
            feedback.send_html(&anime_not_listed(&title)).await?;
            log_command_success("/removeanime", &caller.username, caller.user_id, caller.chat_id, Some("not listed"));
        }
        Err(e) => {
            log_command_error("/removeanime", &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            feedback.error("Error removing anime from your list. Please try again.").await?;
        }
    }
    Ok(())
}

pub async fn handle_my_list(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let titles = app.lists.get_user_list(&caller.list_key()).await;

    if titles.is_empty() {
        feedback.send_html(&empty_custom_list()).await?;
    } else {
        feedback.send_listing(&format_custom_list(&titles), &app.list_image).await?;
    }

    log_command_success(
        "/mylist",
        &caller.username,
        caller.user_id,
        caller.chat_id,
        Some(&format!("{} titles", titles.len())),
    );
    Ok(())
}

pub async fn handle_clear_list(
    bot: &Bot,
    msg: &Message,
    caller: &Caller,
    app: &AppContext,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    match app.lists.clear_list(&caller.list_key()).await {
        Ok(true) => {
            feedback.send_html(&list_cleared()).await?;
            log_command_success("/clearlist", &caller.username, caller.user_id, caller.chat_id, None);
        }
        Ok(false) => {
            feedback.send_html(&list_already_empty()).await?;
            log_command_success("/clearlist", &caller.username, caller.user_id, caller.chat_id, Some("already empty"));
        }
        Err(e) => {
            log_command_error("/clearlist", &caller.username, caller.user_id, caller.chat_id, &e.to_string());
            feedback.error("Error clearing your list. Please try again.").await?;
        }
    }
    Ok(())
}
