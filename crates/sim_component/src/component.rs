//! The [`Component`] tagged variant and typed access to its payload.
//!
//! An entity stores components as [`Component`] values, one per
//! [`ComponentKind`]. Systems work with the concrete payload types through
//! [`ComponentData`], which maps each payload type to its kind and unwraps
//! it from the variant without any runtime type inspection.

use crate::collision::Collision;
use crate::kind::ComponentKind;
use crate::motion::CustomMotion;
use crate::pairing::Paired;
use crate::spatial::{Position, Rotation, Velocity};
use crate::tags::{Control, Name, Render, Shooter};

/// One component value, tagged with its kind.
#[derive(Debug, Clone)]
pub enum Component {
    Position(Position),
    Velocity(Velocity),
    Rotation(Rotation),
    Name(Name),
    Collision(Collision),
    CustomMotion(CustomMotion),
    Render(Render),
    Control(Control),
    Paired(Paired),
    Shooter(Shooter),
}

impl Component {
    /// The slot this component fills.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Velocity(_) => ComponentKind::Velocity,
            Component::Rotation(_) => ComponentKind::Rotation,
            Component::Name(_) => ComponentKind::Name,
            Component::Collision(_) => ComponentKind::Collision,
            Component::CustomMotion(_) => ComponentKind::CustomMotion,
            Component::Render(_) => ComponentKind::Render,
            Component::Control(_) => ComponentKind::Control,
            Component::Paired(_) => ComponentKind::Paired,
            Component::Shooter(_) => ComponentKind::Shooter,
        }
    }
}

/// Typed access to a component payload.
///
/// Implemented for every payload type. `KIND` is the slot the type fills;
/// the accessors return `None` when handed a component of another kind.
///
/// # Examples
///
/// ```rust
/// use sim_component::{Component, ComponentData, ComponentKind, Position};
///
/// let c: Component = Position::new(1.0, 2.0).into();
/// assert_eq!(Position::KIND, ComponentKind::Position);
/// assert_eq!(Position::from_ref(&c), Some(&Position::new(1.0, 2.0)));
/// ```
pub trait ComponentData: Sized + Into<Component> {
    /// The slot this payload type fills.
    const KIND: ComponentKind;

    /// Borrow the payload if `component` is of this kind.
    fn from_ref(component: &Component) -> Option<&Self>;

    /// Mutably borrow the payload if `component` is of this kind.
    fn from_mut(component: &mut Component) -> Option<&mut Self>;

    /// Unwrap the payload if `component` is of this kind.
    fn from_component(component: Component) -> Option<Self>;
}

macro_rules! component_data {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Component {
                fn from(value: $variant) -> Self {
                    Component::$variant(value)
                }
            }

            impl ComponentData for $variant {
                const KIND: ComponentKind = ComponentKind::$variant;

                fn from_ref(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                fn from_component(component: Component) -> Option<Self> {
                    match component {
                        Component::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

component_data!(
    Position,
    Velocity,
    Rotation,
    Name,
    Collision,
    CustomMotion,
    Render,
    Control,
    Paired,
    Shooter,
);
