use letterjourney_core::Letter;

/// Explore has no challenge; it only remembers the last letter tapped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExploreState {
    pub last_letter: Option<Letter>,
}
