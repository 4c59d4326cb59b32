//! Line-oriented operator console.
//!
//! Three tabs (destination management, hotel management, hotels by destination)
//! driven by one command per line. Rendering is plain text.

use std::fmt::Write as _;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::client::CatalogClient;
use crate::config::Config;
use crate::display::{DestinationInfo, HotelCard, PriceFormatter};
use crate::errors::FormError;
use crate::form::EntityForm;
use crate::kinds::EntityKind;
use crate::list::{DeleteOutcome, EntityList};
use crate::manager::{DestinationManager, EntityManager, HotelManager, Notice};
use crate::models::DestinationChoice;
use crate::viewer::CrossFilterViewer;

/// Top-level page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Destinations,
    Hotels,
    ViewHotels,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Destinations => "destinations",
            Tab::Hotels => "hotels",
            Tab::ViewHotels => "view-hotels",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "destinations" => Ok(Tab::Destinations),
            "hotels" => Ok(Tab::Hotels),
            "view-hotels" | "view" => Ok(Tab::ViewHotels),
            other => Err(format!("Unknown tab: {}", other)),
        }
    }
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Tab(Tab),
    List,
    Reload,
    Form,
    New,
    Edit(String),
    Set { path: String, value: String },
    Submit,
    Delete(String),
    Choices,
    Select(String),
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let required = |what: &str| {
            if rest.is_empty() {
                Err(format!("Usage: {} <{}>", word, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "tab" => Ok(Command::Tab(rest.parse()?)),
            "list" | "ls" => Ok(Command::List),
            "reload" => Ok(Command::Reload),
            "form" => Ok(Command::Form),
            "new" | "cancel" | "reset" => Ok(Command::New),
            "edit" => Ok(Command::Edit(required("id")?)),
            "set" => {
                let (path, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if path.is_empty() {
                    return Err("Usage: set <field> <value>".to_string());
                }
                Ok(Command::Set {
                    path: path.to_string(),
                    value: value.trim().to_string(),
                })
            }
            "submit" | "save" => Ok(Command::Submit),
            "delete" | "rm" => Ok(Command::Delete(required("id")?)),
            "choices" => Ok(Command::Choices),
            "select" => Ok(Command::Select(rest.to_string())),
            other => Err(format!("Unknown command: {} (try `help`)", other)),
        }
    }
}

const HELP: &str = "\
Commands:
  tab destinations|hotels|view-hotels   switch page
  list | reload                         show or refetch the collection
  form                                  show the form
  new                                   reset the form (also cancels an edit)
  edit <id>                             edit a listed record
  set <field> <value>                   change one field, e.g. set contactInfo.email a@b.c
  submit                                save the form
  delete <id>                           delete a record (asks for confirmation)
  choices                               destinations available to the hotel form
  select [<destination id>]             view hotels for a destination; empty clears
  quit";

/// Interactive console state.
pub struct Console {
    tab: Tab,
    client: CatalogClient,
    prices: PriceFormatter,
    destinations: DestinationManager,
    hotels: HotelManager,
    choices: Vec<DestinationChoice>,
    viewer: CrossFilterViewer,
}

impl Console {
    pub fn new(client: CatalogClient, config: &Config) -> Self {
        Self {
            tab: Tab::default(),
            prices: PriceFormatter::new(&config.price_currency),
            destinations: EntityManager::new(client.clone()),
            hotels: EntityManager::new(client.clone()),
            choices: Vec::new(),
            viewer: CrossFilterViewer::new(),
            client,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Read commands until end of input or `quit`.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        let text = self.enter(self.tab).await;
        output.write_all(text.as_bytes()).await?;

        loop {
            output.write_all(format!("{}> ", self.tab.as_str()).as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => command,
                Err(msg) => {
                    output.write_all(format!("{}\n", msg).as_bytes()).await?;
                    continue;
                }
            };

            let text = self.execute(command, &mut lines, &mut output).await?;
            output.write_all(text.as_bytes()).await?;
        }

        self.viewer.teardown();
        output.flush().await
    }

    /// Switch to `tab`, loading what the page shows on entry.
    async fn enter(&mut self, tab: Tab) -> String {
        if self.tab == Tab::ViewHotels && tab != Tab::ViewHotels {
            self.viewer.teardown();
        }
        self.tab = tab;
        tracing::debug!("Entering tab {}", tab.as_str());

        match tab {
            Tab::Destinations => {
                self.destinations.activate().await;
                render_manager(&self.destinations, &self.prices)
            }
            Tab::Hotels => {
                self.hotels.activate().await;
                self.choices = self.hotels.load_destination_choices().await;
                render_manager(&self.hotels, &self.prices)
            }
            Tab::ViewHotels => {
                self.viewer = CrossFilterViewer::new();
                self.viewer.activate(&self.client).await;
                render_viewer(&self.viewer, &self.prices)
            }
        }
    }

    async fn execute<R, W>(
        &mut self,
        command: Command,
        lines: &mut Lines<R>,
        output: &mut W,
    ) -> std::io::Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let text = match (command, self.tab) {
            (Command::Help, _) => format!("{}\n", HELP),
            (Command::Quit, _) => String::new(),
            (Command::Tab(tab), _) => self.enter(tab).await,

            (Command::Choices, Tab::Hotels) => render_choices(&self.choices),
            (Command::Select(id), Tab::ViewHotels) => {
                self.viewer.select(&self.client, &id).await;
                render_viewer(&self.viewer, &self.prices)
            }
            (Command::List, Tab::ViewHotels) => render_viewer(&self.viewer, &self.prices),
            (Command::Reload, Tab::ViewHotels) => self.enter(Tab::ViewHotels).await,

            (command, Tab::Destinations) => {
                manager_command(&mut self.destinations, command, &self.prices, lines, output)
                    .await?
            }
            (command, Tab::Hotels) => {
                manager_command(&mut self.hotels, command, &self.prices, lines, output).await?
            }
            (_, Tab::ViewHotels) => {
                "Read-only page: use `select <destination id>` or `tab <name>`\n".to_string()
            }
        };
        Ok(text)
    }
}

/// Commands shared by both management pages.
async fn manager_command<K, R, W>(
    manager: &mut EntityManager<K>,
    command: Command,
    prices: &PriceFormatter,
    lines: &mut Lines<R>,
    output: &mut W,
) -> std::io::Result<String>
where
    K: EntityKind,
    K::Record: Renderable,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let text = match command {
        Command::List => render_manager(manager, prices),
        Command::Reload => {
            manager.reload().await;
            render_manager(manager, prices)
        }
        Command::Form => render_form(manager.form()),
        Command::New => {
            manager.cancel_edit();
            render_form(manager.form())
        }
        Command::Edit(id) => {
            if manager.edit(&id) {
                render_form(manager.form())
            } else {
                format!("No {} with id {} in the list\n", K::noun(), id)
            }
        }
        Command::Set { path, value } => match manager.form_mut().change_field(&path, value) {
            Ok(()) => String::new(),
            Err(e) => format!("{}\n", e),
        },
        Command::Submit => match manager.submit().await {
            Ok(_) => render_manager(manager, prices),
            Err(FormError::MissingFields(missing)) => {
                format!("Please fill out required fields: {}\n", missing.join(", "))
            }
            Err(e) => format!("{}\n", e),
        },
        Command::Delete(id) => {
            output
                .write_all(format!("{} [y/N] ", EntityList::<K>::delete_prompt()).as_bytes())
                .await?;
            output.flush().await?;
            let answer = lines.next_line().await?.unwrap_or_default();
            let accepted = matches!(answer.trim(), "y" | "Y" | "yes");

            match manager.delete(&id, &mut |_: &str| accepted).await {
                DeleteOutcome::Cancelled => "Cancelled\n".to_string(),
                DeleteOutcome::Deleted | DeleteOutcome::Failed => render_manager(manager, prices),
            }
        }
        _ => "Not available on this page (try `help`)\n".to_string(),
    };
    Ok(text)
}

/// Records that can be listed as text.
pub trait Renderable {
    fn render(&self, prices: &PriceFormatter) -> String;
}

impl Renderable for crate::models::Destination {
    fn render(&self, _prices: &PriceFormatter) -> String {
        DestinationInfo::new(self).to_string()
    }
}

impl Renderable for crate::models::Hotel {
    fn render(&self, prices: &PriceFormatter) -> String {
        HotelCard::new(self, prices).to_string()
    }
}

fn render_notice<K: EntityKind>(manager: &EntityManager<K>, out: &mut String) {
    match manager.notice() {
        Some(Notice::Error(msg)) => {
            let _ = writeln!(out, "! {}", msg);
        }
        Some(Notice::Success(msg)) => {
            let _ = writeln!(out, "✓ {}", msg);
        }
        None => {}
    }
}

fn render_manager<K>(manager: &EntityManager<K>, prices: &PriceFormatter) -> String
where
    K: EntityKind,
    K::Record: Renderable,
{
    let mut out = String::new();
    render_notice(manager, &mut out);
    let list = manager.list();
    if list.is_loading() {
        let _ = writeln!(out, "Loading {}s...", K::noun());
    }
    let _ = writeln!(out, "Existing {}s ({}):", K::LABEL, list.items().len());
    for item in list.items() {
        out.push_str(&item.render(prices));
    }
    out
}

fn render_form<K: EntityKind>(form: &EntityForm<K>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", form.title());
    for (path, value) in K::field_values(form.fields()) {
        let _ = writeln!(out, "  {:<24} {}", path, value);
    }
    out
}

fn render_choices(choices: &[DestinationChoice]) -> String {
    let mut out = String::from("Destinations:\n");
    for choice in choices {
        let _ = writeln!(out, "  {}  {}", choice.id, choice.label);
    }
    out
}

fn render_viewer(viewer: &CrossFilterViewer, prices: &PriceFormatter) -> String {
    let mut out = String::new();
    if let Some(error) = viewer.error() {
        let _ = writeln!(out, "! {}", error);
    }
    if viewer.is_loading_destinations() {
        let _ = writeln!(out, "Loading destinations...");
    }

    let Some(selected) = viewer.selected_destination_id() else {
        out.push_str(&render_choices(&crate::models::destination_choices(
            viewer.destinations(),
        )));
        return out;
    };

    match viewer.selected_destination() {
        Some(destination) => out.push_str(&DestinationInfo::new(destination).to_string()),
        None => {
            let _ = writeln!(out, "No destination information available for {}.", selected);
        }
    }

    if viewer.is_loading() {
        let _ = writeln!(out, "Loading hotels...");
        return out;
    }
    let _ = writeln!(out, "Available Hotels ({})", viewer.hotels().len());
    if viewer.hotels().is_empty() {
        let _ = writeln!(out, "No hotels found for this destination.");
    }
    for hotel in viewer.hotels() {
        out.push_str(&HotelCard::new(hotel, prices).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("help".parse::<Command>(), Ok(Command::Help));
        assert_eq!("tab view".parse::<Command>(), Ok(Command::Tab(Tab::ViewHotels)));
        assert_eq!("edit  h1 ".parse::<Command>(), Ok(Command::Edit("h1".to_string())));
        assert_eq!(
            "set hotelAmenities Wifi, Pool".parse::<Command>(),
            Ok(Command::Set {
                path: "hotelAmenities".to_string(),
                value: "Wifi, Pool".to_string()
            })
        );
        assert_eq!(
            "set imageUrl".parse::<Command>(),
            Ok(Command::Set {
                path: "imageUrl".to_string(),
                value: String::new()
            })
        );
        assert_eq!("select".parse::<Command>(), Ok(Command::Select(String::new())));
        assert!("delete".parse::<Command>().is_err());
        assert!("tab lobby".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_default_tab() {
        assert_eq!(Tab::default(), Tab::Destinations);
        assert_eq!("hotels".parse::<Tab>(), Ok(Tab::Hotels));
    }

    #[test]
    fn test_render_form_lists_every_field() {
        let form = EntityForm::<crate::kinds::HotelKind>::new();
        let text = render_form(&form);
        assert!(text.starts_with("Add New Hotel"));
        assert!(text.contains("starRating"));
        assert!(text.contains("contactInfo.website"));
    }
}
