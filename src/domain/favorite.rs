use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A favorite directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// Stable identifier
    pub id: Uuid,

    /// Directory path (tilde already expanded when added through the store)
    pub path: String,

    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// When this favorite was added
    pub added_at: DateTime<Utc>,

    /// When this favorite was last opened in a terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_opened: Option<DateTime<Utc>>,

    /// How many times it has been opened
    #[serde(default)]
    pub open_count: u32,
}

impl Favorite {
    pub fn new(path: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            name: name.filter(|n| !n.trim().is_empty()),
            added_at: Utc::now(),
            last_opened: None,
            open_count: 0,
        }
    }

    /// Name shown in listings: the explicit name, else the directory name.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => directory_name(&self.path),
        }
    }

    /// Record a successful launch.
    pub fn mark_opened(&mut self, at: DateTime<Utc>) {
        self.last_opened = Some(at);
        self.open_count += 1;
    }

    /// Case-insensitive match against name, path and directory name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let name = self.name.as_deref().unwrap_or("").to_lowercase();
        name.contains(&query)
            || self.path.to_lowercase().contains(&query)
            || directory_name(&self.path).to_lowercase().contains(&query)
    }
}

/// Last path component, or the parent for paths like `/`.
pub fn directory_name(path: &str) -> String {
    let p = Path::new(path);
    match p.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => p
            .parent()
            .map(|parent| parent.display().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| path.to_string()),
    }
}

/// Human-friendly age of a timestamp relative to `now`.
pub fn relative_time(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(date) = date else {
        return "Never".to_string();
    };

    let seconds = (now - date).num_seconds().max(0);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("{} {} ago", n, unit)
        } else {
            format!("{} {}s ago", n, unit)
        }
    };

    match seconds {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 604_800 => match s / 86_400 {
            1 => "Yesterday".to_string(),
            days => format!("{} days ago", days),
        },
        s if s < 2_592_000 => match s / 604_800 {
            1 => "Last week".to_string(),
            weeks => format!("{} weeks ago", weeks),
        },
        s => {
            let months = s / 2_592_000;
            if months == 1 {
                "Last month".to_string()
            } else if months < 12 {
                format!("{} months ago", months)
            } else {
                plural(months / 12, "year")
            }
        }
    }
}
