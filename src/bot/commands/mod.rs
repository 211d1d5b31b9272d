pub mod custom_list;
pub mod schedule;

use chrono::Weekday;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Anime Schedule Bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Today's anime schedule")]
    Today,
    #[command(description = "Tomorrow's anime schedule")]
    Tomorrow,
    #[command(description = "Sunday's anime schedule")]
    Sunday,
    #[command(description = "Monday's anime schedule")]
    Monday,
    #[command(description = "Tuesday's anime schedule")]
    Tuesday,
    #[command(description = "Wednesday's anime schedule")]
    Wednesday,
    #[command(description = "Thursday's anime schedule")]
    Thursday,
    #[command(description = "Friday's anime schedule")]
    Friday,
    #[command(description = "Saturday's anime schedule")]
    Saturday,
    #[command(description = "Your custom list anime for a day, e.g. /cday sunday")]
    Cday(String),
    #[command(description = "Add anime to your list, e.g. /addanime One Piece")]
    AddAnime(String),
    #[command(description = "Remove anime from your list")]
    RemoveAnime(String),
    #[command(description = "View your custom list")]
    MyList,
    #[command(description = "Clear your custom list")]
    ClearList,
}

impl Command {
    /// The fixed weekday of a per-day schedule command.
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Command::Sunday => Some(Weekday::Sun),
            Command::Monday => Some(Weekday::Mon),
            Command::Tuesday => Some(Weekday::Tue),
            Command::Wednesday => Some(Weekday::Wed),
            Command::Thursday => Some(Weekday::Thu),
            Command::Friday => Some(Weekday::Fri),
            Command::Saturday => Some(Weekday::Sat),
            _ => None,
        }
    }

    /// Commands restricted to the admin allow-list.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::Today
                | Command::Tomorrow
                | Command::Cday(_)
                | Command::AddAnime(_)
                | Command::RemoveAnime(_)
                | Command::MyList
                | Command::ClearList
        )
    }

    /// Name used in logs, e.g. `/addanime`.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "/help",
            Command::Start => "/start",
            Command::Today => "/today",
            Command::Tomorrow => "/tomorrow",
            Command::Sunday => "/sunday",
            Command::Monday => "/monday",
            Command::Tuesday => "/tuesday",
            Command::Wednesday => "/wednesday",
            Command::Thursday => "/thursday",
            Command::Friday => "/friday",
            Command::Saturday => "/saturday",
            Command::Cday(_) => "/cday",
            Command::AddAnime(_) => "/addanime",
            Command::RemoveAnime(_) => "/removeanime",
            Command::MyList => "/mylist",
            Command::ClearList => "/clearlist",
        }
    }
}
