use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mood {
    Happy,
    Okay,
    Sad,
    Angry,
    Tired,
    #[serde(other)]
    Unknown,
}

impl Mood {
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Okay => "😐",
            Mood::Sad => "😔",
            Mood::Angry => "😠",
            Mood::Tired => "😴",
            Mood::Unknown => "❔",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Okay => "OKAY",
            Mood::Sad => "SAD",
            Mood::Angry => "ANGRY",
            Mood::Tired => "TIRED",
            Mood::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diary {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub good_things: String,
    #[serde(default)]
    pub bad_things: Option<String>,
    pub mood: Mood,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub entry_date: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Diary {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiary {
    pub title: String,
    pub good_things: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_things: Option<String>,
    pub mood: Mood,
    pub visibility: Visibility,
}

impl NewDiary {
    /// Name of the first required field left blank, if any
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("title")
        } else if self.good_things.trim().is_empty() {
            Some("goodThings")
        } else if self.mood == Mood::Unknown {
            Some("mood")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub good_things: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bad_things: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}
