use std::collections::VecDeque;
use std::vec::IntoIter;

/// An iterator that supports peeking and predicate-driven collection without over-consuming.
///
/// rustlib's [`TakeWhile`] consumes the first item that fails its predicate. `PeekIter` instead
/// peeks before consuming, so the failing item stays available to the next reader. Both the
/// scanner (over characters) and the parser (over tokens) read through it.
///
/// [`TakeWhile`]: core::iter::TakeWhile
pub struct PeekIter<T>
where
    T: Clone,
{
    iter: IntoIter<T>,
    /// A store of items we had to consume from the iterator for peeking.
    lookahead: VecDeque<Option<T>>,
}

impl<T> PeekIter<T>
where
    T: Clone,
{
    pub fn new(iter: IntoIter<T>) -> Self {
        Self {
            iter,
            lookahead: VecDeque::with_capacity(1),
        }
    }

    /// Returns a reference to the next value in the iterator, without consuming it, or `None` if
    /// the iteration is complete.
    pub fn peek(&mut self) -> Option<&T> {
        if self.lookahead.is_empty() {
            let next = self.iter.next();
            self.lookahead.push_back(next);
        }
        self.lookahead[0].as_ref()
    }

    /// Consumes items while `predicate` holds for them, collecting them into `C`.
    pub fn collect_while<P, C>(&mut self, predicate: P) -> C
    where
        P: Fn(&T) -> bool,
        C: std::iter::FromIterator<T>,
    {
        let mut collected = Vec::new();
        while let Some(item) = self.peek() {
            if !predicate(item) {
                break;
            }
            if let Some(item) = self.next() {
                collected.push(item);
            }
        }
        collected.into_iter().collect()
    }
}

impl<T> Iterator for PeekIter<T>
where
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.lookahead
            .pop_front()
            // Note that unwrap_or *cannot* be used here because it is eagerly evaluated, and will
            // evaluate `self.iter.next()` before the lookahead is checked!
            .unwrap_or_else(|| self.iter.next())
    }
}

#[cfg(test)]
mod tests {
    use super::PeekIter;

    #[test]
    fn peek_does_not_consume() {
        let mut iter = PeekIter::new(vec![1, 2, 3].into_iter());
        assert_eq!(iter.peek(), Some(&1));
        assert_eq!(iter.peek(), Some(&1));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
    }

    #[test]
    fn collect_while_keeps_failing_item() {
        let mut iter = PeekIter::new(vec![1, 2, 3, 4, 1].into_iter());
        let small: Vec<_> = iter.collect_while(|n| *n < 3);
        assert_eq!(small, vec![1, 2]);
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.collect::<Vec<_>>(), vec![4, 1]);
    }
}
