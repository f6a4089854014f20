use std::any::Any;

/// A piece of application state stored in a [`crate::StateCtx`].
///
/// Each concrete type is stored at most once; the type itself is the key.
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
