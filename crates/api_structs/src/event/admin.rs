//! Declarative description of the admin screens for events.
//!
//! These structs only describe the form, the table and the detail view.
//! Rendering them is left to whatever admin frontend consumes them.

use agenda_domain::{
    reminder_option_label, EventType, RecurrencePattern, DEFAULT_EVENT_TYPE_COLOR,
    MAX_DESCRIPTION_LENGTH, MAX_LOCATION_LENGTH, MAX_TITLE_LENGTH, PAGE_SIZE_OPTIONS,
    REMINDER_OPTIONS,
};
use serde::{Deserialize, Serialize};

pub const DATE_TIME_DISPLAY_FORMAT: &str = "M j, Y g:i A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn new(value: impl ToString, label: impl ToString) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

fn event_type_options() -> Vec<SelectOption> {
    EventType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

fn event_type_badge_colors() -> Vec<SelectOption> {
    EventType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.badge_color()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormFieldKind {
    Hidden,
    TextInput,
    #[serde(rename_all = "camelCase")]
    Textarea { rows: u32 },
    #[serde(rename_all = "camelCase")]
    DateTimePicker { display_format: String, seconds: bool },
    Select { options: Vec<SelectOption> },
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FormFieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub default: Option<String>,
    /// Name of the toggle that has to be on for this field to be shown
    pub visible_when: Option<String>,
}

impl FormField {
    fn new(name: &str, label: &str, kind: FormFieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            max_length: None,
            placeholder: None,
            helper_text: None,
            default: None,
            visible_when: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    fn default_value(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub name: String,
    pub label: String,
    pub badge: bool,
    pub sortable: bool,
    pub searchable: bool,
    /// Text longer than this is truncated
    pub limit: Option<usize>,
    pub date_format: Option<String>,
    pub placeholder: Option<String>,
    /// Badge color per value, any other value gets `default_color`
    pub colors: Vec<SelectOption>,
    pub default_color: Option<String>,
}

impl TableColumn {
    fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            badge: false,
            sortable: false,
            searchable: false,
            limit: None,
            date_format: None,
            placeholder: None,
            colors: Vec::new(),
            default_color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TableFilterKind {
    Select {
        options: Vec<SelectOption>,
        placeholder: String,
    },
    /// Narrows the listing down to a named event scope when on
    Toggle { query: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilter {
    pub name: String,
    pub label: String,
    pub kind: TableFilterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    pub default_sort_column: String,
    pub default_sort_direction: SortDirection,
    pub searchable: bool,
    pub page_sizes: Vec<u32>,
    pub record_actions: Vec<String>,
    pub bulk_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfolistEntry {
    pub name: String,
    pub label: String,
    pub badge: bool,
    pub markdown: bool,
    pub date_format: Option<String>,
    pub placeholder: Option<String>,
}

impl InfolistEntry {
    fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            badge: false,
            markdown: false,
            date_format: None,
            placeholder: None,
        }
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfolistGrid {
    pub columns: u32,
    pub entries: Vec<InfolistEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfolistSection {
    pub title: String,
    pub description: String,
    pub collapsible: bool,
    pub grids: Vec<InfolistGrid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAdminSchema {
    pub form: FormSchema,
    pub table: TableSchema,
    pub infolist: Vec<InfolistSection>,
}

impl Default for EventAdminSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl EventAdminSchema {
    pub fn new() -> Self {
        Self {
            form: event_form(),
            table: event_table(),
            infolist: vec![event_infolist()],
        }
    }
}

fn event_form() -> FormSchema {
    let recurrence_options = RecurrencePattern::ALL
        .iter()
        .map(|p| SelectOption::new(p.as_str(), p.label()))
        .collect();
    let reminder_options = REMINDER_OPTIONS
        .iter()
        .map(|m| SelectOption::new(m, reminder_option_label(*m)))
        .collect();

    let mut recurrence_pattern = FormField::new(
        "recurrence_pattern",
        "Recurrence Pattern",
        FormFieldKind::Select {
            options: recurrence_options,
        },
    )
    .placeholder("Select recurrence pattern");
    recurrence_pattern.visible_when = Some("is_recurring".to_string());

    let mut reminder = FormField::new(
        "reminder",
        "Reminder",
        FormFieldKind::Select {
            options: reminder_options,
        },
    )
    .placeholder("Optional reminder");
    reminder.helper_text = Some("Set a reminder notification for this event".to_string());

    FormSchema {
        fields: vec![
            FormField::new("user_id", "User", FormFieldKind::Hidden),
            FormField::new("title", "Title", FormFieldKind::TextInput)
                .required()
                .max_length(MAX_TITLE_LENGTH)
                .placeholder("Enter event title"),
            FormField::new("description", "Description", FormFieldKind::Textarea { rows: 3 })
                .max_length(MAX_DESCRIPTION_LENGTH)
                .placeholder("Optional event description"),
            FormField::new(
                "date",
                "Date",
                FormFieldKind::DateTimePicker {
                    display_format: DATE_TIME_DISPLAY_FORMAT.to_string(),
                    seconds: false,
                },
            )
            .required()
            .default_value("now")
            .placeholder("Select event date and time"),
            FormField::new("location", "Location", FormFieldKind::TextInput)
                .max_length(MAX_LOCATION_LENGTH)
                .placeholder("Optional event location"),
            FormField::new(
                "event_type",
                "Event Type",
                FormFieldKind::Select {
                    options: event_type_options(),
                },
            )
            .required()
            .default_value(EventType::default().as_str())
            .placeholder("Select event type"),
            FormField::new("is_recurring", "Recurring Event", FormFieldKind::Toggle)
                .default_value("false"),
            recurrence_pattern,
            reminder,
        ],
    }
}

fn event_table() -> TableSchema {
    let mut title = TableColumn::new("title", "Title");
    title.searchable = true;
    title.sortable = true;
    title.limit = Some(50);

    let mut event_type = TableColumn::new("event_type", "Event Type");
    event_type.badge = true;
    event_type.colors = event_type_badge_colors();
    event_type.default_color = Some(DEFAULT_EVENT_TYPE_COLOR.to_string());

    let mut date = TableColumn::new("date", "Date");
    date.date_format = Some(DATE_TIME_DISPLAY_FORMAT.to_string());
    date.sortable = true;
    date.searchable = true;

    let mut location = TableColumn::new("location", "Location");
    location.searchable = true;
    location.limit = Some(30);
    location.placeholder = Some("No location".to_string());

    let mut is_recurring = TableColumn::new("is_recurring", "Recurring");
    is_recurring.badge = true;

    let mut reminder = TableColumn::new("reminder", "Reminder");
    reminder.placeholder = Some("No reminder".to_string());

    let toggle = |name: &str, label: &str, query: &str| TableFilter {
        name: name.to_string(),
        label: label.to_string(),
        kind: TableFilterKind::Toggle {
            query: query.to_string(),
        },
    };

    TableSchema {
        columns: vec![title, event_type, date, location, is_recurring, reminder],
        filters: vec![
            TableFilter {
                name: "event_type".to_string(),
                label: "Event Type".to_string(),
                kind: TableFilterKind::Select {
                    options: event_type_options(),
                    placeholder: "All types".to_string(),
                },
            },
            toggle("upcoming", "Upcoming Events", "upcoming"),
            toggle("today", "Today's Events", "today"),
            toggle("this_month", "This Month", "thisMonth"),
            toggle("has_reminder", "Has Reminder", "hasReminder"),
        ],
        default_sort_column: "date".to_string(),
        default_sort_direction: SortDirection::Asc,
        searchable: true,
        page_sizes: PAGE_SIZE_OPTIONS.to_vec(),
        record_actions: vec!["view".to_string(), "edit".to_string()],
        bulk_actions: vec!["delete".to_string()],
    }
}

fn event_infolist() -> InfolistSection {
    let title = InfolistEntry::new("title", "Event Title");
    let mut event_type = InfolistEntry::new("event_type", "Event Type");
    event_type.badge = true;
    let mut description =
        InfolistEntry::new("description", "Description").placeholder("No description provided");
    description.markdown = true;
    let mut date = InfolistEntry::new("date", "Date & Time");
    date.date_format = Some(DATE_TIME_DISPLAY_FORMAT.to_string());

    InfolistSection {
        title: "Event Details".to_string(),
        description: "Basic event information and scheduling".to_string(),
        collapsible: true,
        grids: vec![
            InfolistGrid {
                columns: 2,
                entries: vec![title, event_type],
            },
            InfolistGrid {
                columns: 1,
                entries: vec![description],
            },
            InfolistGrid {
                columns: 2,
                entries: vec![
                    date,
                    InfolistEntry::new("location", "Location")
                        .placeholder("No location specified"),
                ],
            },
            InfolistGrid {
                columns: 2,
                entries: vec![
                    InfolistEntry::new("is_recurring", "Recurring Event"),
                    InfolistEntry::new("recurrence_pattern", "Recurrence Pattern")
                        .placeholder("Not applicable"),
                    InfolistEntry::new("reminder", "Reminder"),
                ],
            },
        ],
    }
}

/// Text of the reminder cell in the events table
pub fn table_reminder_text(reminder: Option<i64>) -> String {
    match reminder {
        Some(minutes) => format!("{} min", minutes),
        None => "None".to_string(),
    }
}

/// Text of the reminder entry in the event detail view
pub fn infolist_reminder_text(reminder: Option<i64>) -> String {
    match reminder {
        Some(minutes) => format!("{} minutes before", minutes),
        None => "No reminder set".to_string(),
    }
}

/// Truncates `text` to `limit` characters, marking the cut with `...`
pub fn limit_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(limit).collect();
        format!("{}...", truncated.trim_end())
    }
}
