//! Keeps the shell's edge registrations in line with the configuration.
//!
//! The registry remembers which edges the shell accepted.  When the desired
//! list differs (order matters), every tracked edge is unregistered and the
//! whole new list registered again; never a partial update.  Edges the shell
//! refuses are left out of the tracked list, so they are retried the next
//! time the configuration is applied.

use crate::edge::EdgeId;
use crate::traits::ScreenEdges;
use log::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct EdgeRegistry {
    registered: Vec<EdgeId>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edges currently registered with the shell, in registration order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.registered
    }

    /// Whether crossings of `edge` should be acted on.
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.registered.contains(&edge)
    }

    /// Bring the shell's registrations in line with `desired`.
    ///
    /// Returns `true` when a re-registration cycle ran, `false` when the
    /// registered edges already matched.
    pub fn reconcile<E: ScreenEdges>(&mut self, shell: &E, desired: &[EdgeId]) -> bool {
        if self.registered.as_slice() == desired {
            return false;
        }

        for edge in self.registered.drain(..) {
            if let Err(e) = shell.unregister_edge(edge) {
                debug!("unregister {} failed: {}", edge, e);
            }
        }

        for &edge in desired {
            if self.registered.contains(&edge) {
                continue;
            }
            match shell.register_edge(edge) {
                Ok(()) => self.registered.push(edge),
                Err(e) => warn!("could not register edge {}: {}", edge, e),
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Register(EdgeId),
        Unregister(EdgeId),
    }

    /// Records every call; refuses edges listed in `refuse`.
    #[derive(Debug, Default)]
    struct RecorderEdges {
        calls: RefCell<Vec<Call>>,
        refuse: Vec<EdgeId>,
        fail_unregister: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recorder error")]
    struct RecorderErr;

    impl ScreenEdges for RecorderEdges {
        type Error = RecorderErr;

        fn register_edge(&self, edge: EdgeId) -> Result<(), RecorderErr> {
            self.calls.borrow_mut().push(Call::Register(edge));
            if self.refuse.contains(&edge) {
                Err(RecorderErr)
            } else {
                Ok(())
            }
        }

        fn unregister_edge(&self, edge: EdgeId) -> Result<(), RecorderErr> {
            self.calls.borrow_mut().push(Call::Unregister(edge));
            if self.fail_unregister {
                Err(RecorderErr)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn applying_same_edges_twice_runs_one_cycle() {
        let shell = RecorderEdges::default();
        let mut reg = EdgeRegistry::new();
        let edges = [EdgeId::Left, EdgeId::Right];

        assert!(reg.reconcile(&shell, &edges));
        assert_eq!(
            *shell.calls.borrow(),
            vec![Call::Register(EdgeId::Left), Call::Register(EdgeId::Right)]
        );

        shell.calls.borrow_mut().clear();
        assert!(!reg.reconcile(&shell, &edges));
        assert!(shell.calls.borrow().is_empty());
    }

    #[test]
    fn change_unregisters_everything_then_registers_new_set() {
        let shell = RecorderEdges::default();
        let mut reg = EdgeRegistry::new();
        reg.reconcile(&shell, &[EdgeId::Left]);
        shell.calls.borrow_mut().clear();

        reg.reconcile(&shell, &[EdgeId::Left, EdgeId::Right]);
        assert_eq!(
            *shell.calls.borrow(),
            vec![
                Call::Unregister(EdgeId::Left),
                Call::Register(EdgeId::Left),
                Call::Register(EdgeId::Right),
            ]
        );
        assert_eq!(reg.edges(), &[EdgeId::Left, EdgeId::Right]);
    }

    #[test]
    fn order_change_counts_as_change() {
        let shell = RecorderEdges::default();
        let mut reg = EdgeRegistry::new();
        reg.reconcile(&shell, &[EdgeId::Left, EdgeId::Right]);
        assert!(reg.reconcile(&shell, &[EdgeId::Right, EdgeId::Left]));
        assert_eq!(reg.edges(), &[EdgeId::Right, EdgeId::Left]);
    }

    #[test]
    fn refused_edge_is_not_tracked_and_others_continue() {
        let shell = RecorderEdges {
            refuse: vec![EdgeId::Top],
            ..Default::default()
        };
        let mut reg = EdgeRegistry::new();
        reg.reconcile(&shell, &[EdgeId::Left, EdgeId::Top, EdgeId::Bottom]);
        assert_eq!(reg.edges(), &[EdgeId::Left, EdgeId::Bottom]);
        assert!(!reg.contains(EdgeId::Top));
    }

    #[test]
    fn failed_unregister_is_dropped_anyway() {
        let shell = RecorderEdges {
            fail_unregister: true,
            ..Default::default()
        };
        let mut reg = EdgeRegistry::new();
        reg.reconcile(&shell, &[EdgeId::Left]);
        reg.reconcile(&shell, &[EdgeId::Right]);
        assert_eq!(reg.edges(), &[EdgeId::Right]);
    }

    #[test]
    fn empty_set_clears_registrations() {
        let shell = RecorderEdges::default();
        let mut reg = EdgeRegistry::new();
        reg.reconcile(&shell, &[EdgeId::Left]);
        assert!(reg.reconcile(&shell, &[]));
        assert!(reg.edges().is_empty());
        assert!(!reg.reconcile(&shell, &[]));
    }
}
