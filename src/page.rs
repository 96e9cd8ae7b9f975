use crate::analytics::TrackEvent;
use serde::Serialize;

pub const PAGE_LOCATION: &str = "Montreal in Motion";

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    List,
    Grid,
}

impl LayoutMode {
    pub fn toggled(self) -> Self {
        match self {
            LayoutMode::List => LayoutMode::Grid,
            LayoutMode::Grid => LayoutMode::List,
        }
    }

    pub fn grid_classes(self) -> &'static str {
        match self {
            LayoutMode::List => "grid-cols-1",
            LayoutMode::Grid => "grid-cols-2 lg:grid-cols-3",
        }
    }
}

/// The "about" dialog is a bottom sheet on touch screens and a centered
/// modal everywhere else.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Overlay {
    Modal,
    Sheet,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Face {
    /// A face that shows the scrolling page content. Only the main face is
    /// interactive.
    Scroll { id: &'static str, is_main: bool },
    Side { side: Side },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub touch_screen: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    layout: LayoutMode,
    dialog_open: bool,
    capabilities: Capabilities,
}

impl PageState {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            ..Default::default()
        }
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn set_layout(&mut self, layout: LayoutMode) {
        self.layout = layout;
    }

    pub fn toggle_layout(&mut self) -> LayoutMode {
        self.layout = self.layout.toggled();
        self.layout
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn open_dialog(&mut self) -> TrackEvent {
        self.dialog_open = true;
        TrackEvent::about_modal(PAGE_LOCATION)
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn overlay(&self) -> Overlay {
        if self.capabilities.touch_screen {
            Overlay::Sheet
        } else {
            Overlay::Modal
        }
    }

    pub fn faces(&self) -> Vec<Face> {
        let mut faces = vec![Face::Scroll {
            id: "main",
            is_main: true,
        }];

        if !self.capabilities.touch_screen {
            faces.extend([
                Face::Scroll {
                    id: "top",
                    is_main: false,
                },
                Face::Scroll {
                    id: "bottom",
                    is_main: false,
                },
                Face::Side { side: Side::Left },
                Face::Side { side: Side::Right },
            ]);
        }

        faces
    }
}
