use super::LngEvent;

/// Result of a computation which can be canceled by a
/// [`ComputationHandler`](super::ComputationHandler).
#[must_use]
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum LngResult<R> {
    /// The computation finished.
    Ok(R),
    /// The computation was canceled by the handler on the given event.
    Canceled(LngEvent),
}

impl<R> LngResult<R> {
    /// Returns the result of a finished computation.
    pub fn result(self) -> Option<R> {
        match self {
            Self::Ok(r) => Some(r),
            Self::Canceled(_) => None,
        }
    }

    pub const fn result_ref(&self) -> Option<&R> {
        match self {
            Self::Ok(r) => Some(r),
            Self::Canceled(_) => None,
        }
    }

    /// Returns the event which canceled the computation.
    pub fn cancel_cause(self) -> Option<LngEvent> {
        match self {
            Self::Canceled(e) => Some(e),
            Self::Ok(_) => None,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub const fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled(_))
    }

    pub fn map<T, F: FnOnce(R) -> T>(self, transformation: F) -> LngResult<T> {
        match self {
            Self::Ok(r) => LngResult::Ok(transformation(r)),
            Self::Canceled(lng_event) => LngResult::Canceled(lng_event),
        }
    }

    /// Continues a finished computation with another cancelable computation.
    pub fn and_then<T, F: FnOnce(R) -> LngResult<T>>(self, transformation: F) -> LngResult<T> {
        match self {
            Self::Ok(r) => transformation(r),
            Self::Canceled(lng_event) => LngResult::Canceled(lng_event),
        }
    }
}

impl<T> From<Result<T, LngEvent>> for LngResult<T> {
    fn from(value: Result<T, LngEvent>) -> Self {
        match value {
            Ok(r) => Self::Ok(r),
            Err(e) => Self::Canceled(e),
        }
    }
}

impl<T> From<LngResult<T>> for Result<T, LngEvent> {
    fn from(value: LngResult<T>) -> Self {
        match value {
            LngResult::Ok(r) => Ok(r),
            LngResult::Canceled(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::{LngComputation, LngEvent};

    use super::LngResult;

    #[test]
    fn test_conversions() {
        let ok: LngResult<u32> = Ok(3).into();
        assert_eq!(ok.clone().map(|r| r * 2), LngResult::Ok(6));
        assert_eq!(ok.result_ref(), Some(&3));
        let canceled: LngResult<u32> = Err(LngEvent::DnnfShannonExpansion).into();
        assert!(canceled.is_canceled());
        assert_eq!(canceled.clone().and_then(|r| LngResult::Ok(r + 1)), LngResult::Canceled(LngEvent::DnnfShannonExpansion));
        assert_eq!(canceled.cancel_cause(), Some(LngEvent::DnnfShannonExpansion));
        let back: Result<u32, LngEvent> = LngResult::Canceled(LngEvent::ComputationStarted(LngComputation::Sdd)).into();
        assert_eq!(back, Err(LngEvent::ComputationStarted(LngComputation::Sdd)));
    }
}
