//! State machine trait shared by the hub and payment status enums.

use super::ValidationError;

/// A status enum with an explicit transition table.
///
/// Implementors list their legal edges once; callers go through
/// [`StateMachine::transition_to`] so no code path recomputes state ad hoc.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    fn can_transition_to(&self, target: &Self) -> bool;

    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns `target` if the edge exists, otherwise a validation error.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "status",
                format!("cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Green,
        Amber,
        Red,
        Off,
    }

    impl StateMachine for Light {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Light::*;
            match self {
                Green => vec![Amber, Off],
                Amber => vec![Red, Off],
                Red => vec![Green, Off],
                Off => vec![],
            }
        }
    }

    #[test]
    fn legal_edge_returns_target() {
        assert_eq!(Light::Green.transition_to(Light::Amber), Ok(Light::Amber));
    }

    #[test]
    fn illegal_edge_names_both_states() {
        let err = Light::Green.transition_to(Light::Red).unwrap_err();
        assert!(err.to_string().contains("Green"));
        assert!(err.to_string().contains("Red"));
    }

    #[test]
    fn terminal_state_has_no_exits() {
        assert!(Light::Off.is_terminal());
        assert!(!Light::Red.is_terminal());
    }
}
