//! Telegram HTML rendering of schedules, custom lists and fixed replies.
//!
//! Every piece of user or upstream text is passed through [`escape_html`].

use crate::services::schedule::AggregatedAnime;
use crate::utils::html::escape_html;

const DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━";
const ENTRY_DIVIDER: &str = "<b>┈┈┈┈┈┈┈┈┈┈┈┈┈┈┈┈</b>";

/// Renders one block per anime followed by a total count.
pub fn format_anime_list(list: &[AggregatedAnime], day_label: &str) -> String {
    if list.is_empty() {
        return no_anime_scheduled(day_label);
    }

    let mut message = String::from("\n");

    for anime in list {
        message.push_str(&format!("✦ <b>{}</b>\n", escape_html(&anime.display_title)));
        message.push_str(&format!(
            "✦ <b>Episode:</b> <code>{}</code> | <b>Status:</b> <code>{}</code>\n",
            escape_html(&anime.episode),
            escape_html(&anime.status)
        ));

        match anime.broadcast_entries.as_slice() {
            [single] => message.push_str(&format!(
                "✦ <b>Type:</b> • <code>{}</code> | <code>{}</code>\n",
                escape_html(&single.kind),
                escape_html(&single.local_time)
            )),
            entries => {
                message.push_str("✦ <b>Types:</b>");
                for entry in entries {
                    message.push_str(&format!(
                        " • <code>{}: {}</code>",
                        escape_html(&entry.kind),
                        escape_html(&entry.local_time)
                    ));
                }
                message.push('\n');
            }
        }

        message.push_str(ENTRY_DIVIDER);
        message.push('\n');
    }

    message.push_str(&format!("\n<i>📊 Total anime: {}</i>", list.len()));
    message
}

pub fn no_anime_scheduled(day_label: &str) -> String {
    format!("🔍 No anime scheduled for {}.", escape_html(day_label))
}

/// Full reply for a day's schedule.
pub fn schedule_message(day_label: &str, list: &[AggregatedAnime]) -> String {
    format!(
        "<b><u>📅 ANIME SCHEDULE - {}</u></b>\n\n{}",
        escape_html(&day_label.to_uppercase()),
        format_anime_list(list, day_label)
    )
}

/// Full reply for a day's schedule filtered by the user's list.
pub fn custom_schedule_message(day_label: &str, list: &[AggregatedAnime]) -> String {
    format!(
        "<b><u>🔖 {} - YOUR SCHEDULED ANIME</u></b>\n{}",
        escape_html(&day_label.to_uppercase()),
        format_anime_list(list, day_label)
    )
}

/// Numbered rendering of a user's custom list.
pub fn format_custom_list(titles: &[String]) -> String {
    if titles.is_empty() {
        return empty_custom_list();
    }

    let mut message = format!("<b>YOUR CUSTOM ANIME LIST</b>\n{DIVIDER}\n");
    for (index, title) in titles.iter().enumerate() {
        message.push_str(&format!("{}. <b>{}</b>\n", index + 1, escape_html(title)));
    }
    message.push_str(&format!(
        "{DIVIDER}\n<i>📊 Total: <b>{}</b> anime</i>",
        titles.len()
    ));
    message
}

pub fn empty_custom_list() -> String {
    "🔖 Your custom anime list is empty!\n\nUse /addanime &lt;title&gt; to add anime.".to_string()
}

pub fn no_custom_anime_for_day(day_label: &str) -> String {
    format!(
        "🔍 No anime from your custom list scheduled for {}.",
        escape_html(day_label)
    )
}

pub fn anime_added(title: &str) -> String {
    format!("✅ <b>\"{}\"</b> added to your custom list!", escape_html(title))
}

pub fn anime_already_listed(title: &str) -> String {
    format!("🔖 <b>\"{}\"</b> is already in your custom list.", escape_html(title))
}

pub fn anime_removed(title: &str) -> String {
    format!("🗑️ <b>\"{}\"</b> removed from your custom list!", escape_html(title))
}

pub fn anime_not_listed(title: &str) -> String {
    format!("❌ <b>\"{}\"</b> not found in your custom list.", escape_html(title))
}

pub fn list_cleared() -> String {
    "🗑️ <b>Your custom anime list has been cleared!</b>".to_string()
}

pub fn list_already_empty() -> String {
    "🔖 Your custom list is already empty.".to_string()
}

pub fn welcome_message() -> String {
    format!(
        "<b><u>Welcome to the Anime Schedule Bot!</u></b>\n\n\
        📅 <b>Schedule Commands:</b>\n\
        • <code>/today</code> - Today's anime schedule\n\
        • <code>/tomorrow</code> - Tomorrow's anime schedule\n\
        • <code>/sunday</code>, <code>/monday</code> etc. - Specific day schedule\n\n\
        🔖 <b>Custom List Commands:</b>\n\
        • <code>/cday</code> - Custom list anime for specific day\n\
        • <code>/addanime</code> - Add anime to your list\n\
        • <code>/removeanime</code> - Remove from your list\n\
        • <code>/mylist</code> - View your custom list\n\
        • <code>/clearlist</code> - Clear your custom list\n\n\
        <b>Examples:</b>\n\
        <code>/cday sunday</code> - Custom anime for Sunday\n\
        <code>/addanime One Piece</code> - Add One Piece to list\n\n\
        {DIVIDER}"
    )
}
