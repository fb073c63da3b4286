use std::sync::Arc;

use marquee_traits::PlatformProvider;

/// Construction options for a [`SelectionRegion`](crate::SelectionRegion).
///
/// Every field is optional; a missing platform provider falls back to
/// [`DummyPlatformProvider`](marquee_traits::DummyPlatformProvider), which
/// swallows clipboard and haptic signals.
#[derive(Default)]
pub struct RegionConfig {
    pub platform: Option<Arc<dyn PlatformProvider>>,
}
