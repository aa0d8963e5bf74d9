//! Declarative form field construction
//!
//! `fieldsmith` turns sparse field requests into detached, renderable widget
//! trees and gives uniform read/update access to their values afterward. It
//! knows nothing about what the fields mean; callers decide which fields to
//! build and what to do with the values.
//!
//! # Architecture
//!
//! - **Normalize**: `normalize()` completes a `FieldRequest` into a `FieldDescriptor`
//! - **Build**: `FieldBuilder::build()` emits a wrapper with a label block and the control
//! - **Update / read**: `FieldBuilder::update()` and `field_value()` share one value model
//! - **Surface**: owns inserted elements, relocates widgets by id, delivers activations
//! - **Quick buttons**: activations become `dispatch_event` messages on an `EventChannel`
//!
//! ```rust,ignore
//! let builder = FieldBuilder::new();
//! let wrapper = builder.build(
//!     &FieldRequest::new("text")
//!         .with_label("Callsign")
//!         .with_constraint("maxlength", 12),
//! )?;
//! surface.insert(wrapper);
//! ```

pub mod accessor;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod ids;
pub mod kind;
pub mod surface;
pub mod translate;
pub mod types;

pub use accessor::field_value;
pub use builder::{FieldBuilder, BUTTON_ID_DATA_KEY, OPTION_DATA_KEY};
pub use config::{ClassNames, FormsConfig, PasswordMode};
pub use descriptor::{normalize, FieldDescriptor, FieldRequest};
pub use dispatch::{
    ActivationListener, BroadcastChannel, DispatchPayload, EventChannel, OutboundEvent,
    QuickButtonDispatcher, DISPATCH_EVENT, QUICKBUTTON_NAMESPACE,
};
pub use element::{Element, Node};
pub use error::{FormsError, Result};
pub use ids::IdGenerator;
pub use kind::{Control, FieldKind};
pub use surface::Surface;
pub use translate::{Catalog, Identity, Translate};
pub use types::{Constraints, DataStore, FieldValue, QuickButton, SelectChoice};
