//! Menu core for HELM.
//!
//! A [`MenuController`] owns the category list and a [`ScreenStack`] of
//! nested screens, turns discrete [`NavEvent`](helm_types::input::NavEvent)s
//! into screen transitions, and hands selected commands to the dispatcher.
//! Front ends read [`Frame`]s from [`MenuController::draw`].

pub mod controller;
pub mod frame;
pub mod layout;
pub mod nav;
pub mod params;
pub mod screens;
pub mod stack;

pub use controller::MenuController;
pub use frame::{Frame, Row, Tab};
pub use layout::{Category, MenuItem, build_categories};
pub use params::{ParameterCollector, ValidationError};
pub use screens::{MenuState, Screen, ScreenContext, Transition};
pub use stack::{Lifecycle, ScreenStack};
