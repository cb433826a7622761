//! State identity.

use core::fmt::{Debug, Display};
use core::hash::Hash;

/// Key that identifies one state inside one machine.
///
/// Implemented automatically for any small value type that can be copied,
/// compared, hashed and printed. Actor graphs use fieldless enums with
/// explicit discriminants:
///
/// ```rust,ignore
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
/// enum SlimeStateId {
///     Idle = 0,
///     Movement = 1,
/// }
/// ```
pub trait StateId: Copy + Eq + Hash + Debug + Display + 'static {}

impl<T> StateId for T where T: Copy + Eq + Hash + Debug + Display + 'static {}
