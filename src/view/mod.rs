// src/view/mod.rs
//! Results rendering: typed markup, score animation and display surfaces

pub mod animator;
pub mod labels;
pub mod markup;
pub mod results;
pub mod surface;

pub use animator::{AnimationHandle, ScoreAnimator};
pub use labels::Labels;
pub use markup::{GaugeFrame, ResultsMarkup, ScoreGauge, TagKind, TagNode};
pub use results::ResultsView;
pub use surface::{DisplaySurface, Notice, NoticeKind, TerminalSurface};
