/// Named `<audio>` cues present in the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CueId {
    Ambient,
    Ritual,
    Portal,
    FullMoon,
    EasterEgg,
    Wow,
}

impl CueId {
    pub fn element_id(self) -> &'static str {
        match self {
            CueId::Ambient => "ambient-sound",
            CueId::Ritual => "ritual-sound",
            CueId::Portal => "portal-sound",
            CueId::FullMoon => "fullmoon-sound",
            CueId::EasterEgg => "easteregg-sound",
            CueId::Wow => "wow-sound",
        }
    }
}

/// Side effects the session asks the browser shell to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum UiCommand {
    Show(String),
    Hide(String),
    SetText { id: String, text: String },
    PlayCue { cue: CueId, looped: bool, volume: f32 },
    StopCue(CueId),
    RequestCapture,
    ReleaseCapture,
    /// Status line for the access-code form; falls back to an alert.
    AccessStatus(String),
}

impl UiCommand {
    pub fn show(id: &str) -> Self {
        UiCommand::Show(id.to_string())
    }

    pub fn hide(id: &str) -> Self {
        UiCommand::Hide(id.to_string())
    }

    pub fn set_text(id: &str, text: impl Into<String>) -> Self {
        UiCommand::SetText {
            id: id.to_string(),
            text: text.into(),
        }
    }

    pub fn play(cue: CueId, volume: f32) -> Self {
        UiCommand::PlayCue {
            cue,
            looped: false,
            volume,
        }
    }

    pub fn play_loop(cue: CueId, volume: f32) -> Self {
        UiCommand::PlayCue {
            cue,
            looped: true,
            volume,
        }
    }
}
