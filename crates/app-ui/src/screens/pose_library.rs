//! Pose library: a pager over the example photos of one pose category

use app_core::Pose;
use app_state::{Reducer, Store};

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

/// Pose library state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseLibraryState {
    /// Category being browsed
    pub pose: Pose,
    /// Zero-based index of the photo on screen
    pub current_index: usize,
}

impl PoseLibraryState {
    /// Start at the first photo of `pose`
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            current_index: 0,
        }
    }

    /// Page counter, e.g. "3/8"
    pub fn counter(&self) -> String {
        format!("{}/{}", self.current_index + 1, self.pose.photo_count())
    }

    fn last_index(&self) -> usize {
        self.pose.photo_count().saturating_sub(1)
    }
}

/// Pose library intents
#[derive(Debug, Clone, PartialEq)]
pub enum PoseLibraryIntent {
    /// Show the previous photo
    Previous,
    /// Show the next photo
    Next,
    /// Jump to a photo, clamped to the category
    Show(usize),
    /// Leave the library
    Back,
}

/// Pose library logic
#[derive(Debug, Default)]
pub struct PoseLibraryReducer;

/// Running pose library
pub type PoseLibraryStore = Store<PoseLibraryReducer>;

impl Reducer for PoseLibraryReducer {
    type State = PoseLibraryState;
    type Intent = PoseLibraryIntent;
    type Destination = Destination;

    fn reduce(
        &self,
        state: &mut PoseLibraryState,
        intent: PoseLibraryIntent,
    ) -> ScreenEffect<PoseLibraryIntent> {
        match intent {
            PoseLibraryIntent::Previous => {
                state.current_index = state.current_index.saturating_sub(1);
            }
            PoseLibraryIntent::Next => {
                state.current_index = (state.current_index + 1).min(state.last_index());
            }
            PoseLibraryIntent::Show(index) => {
                state.current_index = index.min(state.last_index());
            }
            PoseLibraryIntent::Back => return ScreenEffect::pop(),
        }
        ScreenEffect::None
    }
}

/// Header of the pose library
pub fn header(state: &PoseLibraryState) -> ScreenHeader<PoseLibraryIntent> {
    ScreenHeader::new()
        .with_leading(HeaderButton::new(HeaderIcon::Back, PoseLibraryIntent::Back))
        .with_title(state.pose.title())
}
