use super::FaultRef;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// An entry of the interception allow-list.
///
/// A class is a named membership test over faults. [`FaultClass::any`] is the
/// root of every fault, [`FaultClass::of`] matches one concrete type and
/// [`FaultClass::matching`] covers a family of types, for example every
/// variant of a domain error enum or several related error structs.
#[derive(Clone)]
pub struct FaultClass {
    name: Cow<'static, str>,
    matcher: fn(FaultRef<'_>) -> bool,
}

fn is_type<E: Error + Send + Sync + 'static>(fault: FaultRef<'_>) -> bool {
    fault.is::<E>()
}

impl FaultClass {
    /// Matches every fault.
    pub fn any() -> Self {
        Self {
            name: Cow::Borrowed("any"),
            matcher: |_| true,
        }
    }

    /// Matches faults whose concrete type is `E`.
    pub fn of<E: Error + Send + Sync + 'static>() -> Self {
        Self {
            name: Cow::Borrowed(std::any::type_name::<E>()),
            matcher: is_type::<E>,
        }
    }

    /// Matches faults accepted by `matcher`.
    pub fn matching(name: impl Into<Cow<'static, str>>, matcher: fn(FaultRef<'_>) -> bool) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, fault: FaultRef<'_>) -> bool {
        (self.matcher)(fault)
    }
}

impl Default for FaultClass {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Debug for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaultClass").field(&self.name).finish()
    }
}
