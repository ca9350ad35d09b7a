//! Photo poses tab

use app_core::Pose;
use app_state::{Reducer, Store};

use crate::components::{HeaderButton, HeaderIcon, ScreenHeader};
use crate::navigation::{Destination, ScreenEffect};

/// Poses tab state
#[derive(Debug, Clone, PartialEq)]
pub struct PosesState {
    /// Pose categories, in display order
    pub poses: Vec<Pose>,
}

impl Default for PosesState {
    fn default() -> Self {
        Self {
            poses: Pose::ALL.to_vec(),
        }
    }
}

/// Poses tab intents
#[derive(Debug, Clone, PartialEq)]
pub enum PosesIntent {
    /// Open a pose category
    TapPose(Pose),
    /// Open settings
    TapSettings,
}

/// Poses tab logic
#[derive(Debug, Default)]
pub struct PosesReducer;

/// Running poses tab
pub type PosesStore = Store<PosesReducer>;

impl Reducer for PosesReducer {
    type State = PosesState;
    type Intent = PosesIntent;
    type Destination = Destination;

    fn reduce(&self, _state: &mut PosesState, intent: PosesIntent) -> ScreenEffect<PosesIntent> {
        match intent {
            PosesIntent::TapPose(pose) => ScreenEffect::push(Destination::PoseLibrary(pose)),
            PosesIntent::TapSettings => ScreenEffect::present_modal(Destination::Settings),
        }
    }
}

/// Header of the poses tab
pub fn header(_state: &PosesState) -> ScreenHeader<PosesIntent> {
    ScreenHeader::new()
        .with_title("Photo Poses")
        .with_trailing(HeaderButton::new(HeaderIcon::Settings, PosesIntent::TapSettings))
}
