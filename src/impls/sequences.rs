use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Node;
use crate::ops::{NodeKind, NodeRef, Sequence};

impl<T: Node> Node for Vec<T> {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Sequence(self)
    }
}

impl<T: Node> Sequence for Vec<T> {
    fn get(&self, index: usize) -> Option<&dyn Node> {
        self.as_slice().get(index).map(|value| value as &dyn Node)
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

impl<T: Node, const N: usize> Node for [T; N] {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Sequence(self)
    }
}

impl<T: Node, const N: usize> Sequence for [T; N] {
    fn get(&self, index: usize) -> Option<&dyn Node> {
        self.as_slice().get(index).map(|value| value as &dyn Node)
    }

    fn len(&self) -> usize {
        N
    }
}

impl<T: Node> Node for VecDeque<T> {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Sequence
    }

    #[inline]
    fn node_ref(&self) -> NodeRef<'_> {
        NodeRef::Sequence(self)
    }
}

impl<T: Node> Sequence for VecDeque<T> {
    fn get(&self, index: usize) -> Option<&dyn Node> {
        VecDeque::get(self, index).map(|value| value as &dyn Node)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn vec_positional_access() {
        let vec = vec![10_i32, 20, 30];
        let seq: &dyn Sequence = &vec;

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1).and_then(|v| v.downcast_ref::<i32>()), Some(&20));
        assert!(seq.get(3).is_none());
    }

    #[test]
    fn array_and_deque_positional_access() {
        let array = [1_u8, 2];
        let seq: &dyn Sequence = &array;
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(0).and_then(|v| v.downcast_ref::<u8>()), Some(&1));

        let deque: VecDeque<i32> = VecDeque::from(vec![7, 8]);
        let seq: &dyn Sequence = &deque;
        assert_eq!(seq.get(1).and_then(|v| v.downcast_ref::<i32>()), Some(&8));
    }
}
