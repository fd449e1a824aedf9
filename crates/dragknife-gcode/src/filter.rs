//! Output filter applied to the engine's operations

use super::OutputOp;

/// Keep/drop strategy for engine output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFilter {
    /// Every operation is kept
    #[default]
    PassAll,
    /// Height moves are dropped so the XY path can be inspected alone
    NeverRaiseBlade,
}

impl OutputFilter {
    pub fn keep(&self, op: &OutputOp) -> bool {
        match self {
            Self::PassAll => true,
            Self::NeverRaiseBlade => !op.is_height_move(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::height_move;

    #[test]
    fn test_pass_all() {
        let filter = OutputFilter::PassAll;
        assert!(filter.keep(&OutputOp::RawLine));
        assert!(filter.keep(&height_move(3.0)));
    }

    #[test]
    fn test_never_raise_blade() {
        let filter = OutputFilter::NeverRaiseBlade;
        assert!(filter.keep(&OutputOp::RawLine));
        assert!(filter.keep(&OutputOp::Motion("G1 X1.0000".to_string())));
        assert!(filter.keep(&OutputOp::Motion(
            "G2 X1.0000 Y1.0000 I0.0000 J1.0000".to_string()
        )));
        assert!(!filter.keep(&height_move(3.0)));
    }
}
