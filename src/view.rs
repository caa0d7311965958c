use serde::{Deserialize, Serialize};

/// Top-level screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    #[default]
    Calendar,
    Summary,
    Me,
    RecipeBook,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Calendar, Page::Summary, Page::Me, Page::RecipeBook];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Calendar => "calendar",
            Page::Summary => "summary",
            Page::Me => "me",
            Page::RecipeBook => "recipeBook",
        }
    }

    /// Floating "add meal note" button.
    pub fn shows_add_action(&self) -> bool {
        matches!(self, Page::Calendar)
    }

    pub fn shows_paste_action(&self, has_clipboard: bool) -> bool {
        self.shows_add_action() && has_clipboard
    }

    /// The recipe book is opened from the profile page and covers the tab bar.
    pub fn shows_navigation(&self) -> bool {
        !matches!(self, Page::RecipeBook)
    }
}
