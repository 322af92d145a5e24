// Core windowing logic: pure functions over per-sentence token lengths.
//
// Lengths already include the terminator unit, so a budget check is a plain
// sum. Spans are document-relative and inclusive on both ends.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize { self.end - self.start + 1 }

    pub fn range(&self) -> std::ops::RangeInclusive<usize> { self.start..=self.end }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    pub max_tokens: usize,
    pub max_sents: Option<usize>,
}

/// One window per sentence: the sentence plus as much preceding context as
/// the budget allows.
///
/// Context that was trimmed for sentence `j` is never reconsidered for
/// `j + 1`, so `start` is non-decreasing across the document.
pub struct SlidingWindows<'a> {
    lens: &'a [usize],
    budget: Budget,
    doci: usize,
    next: usize,
}

impl<'a> SlidingWindows<'a> {
    pub fn new(lens: &'a [usize], budget: Budget) -> Self {
        Self { lens, budget, doci: 0, next: 0 }
    }
}

impl Iterator for SlidingWindows<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let j = self.next;
        if j >= self.lens.len() {
            return None;
        }

        let mut start = self.doci;
        let mut tokens: usize = self.lens[start..=j].iter().sum();
        while start < j && tokens > self.budget.max_tokens {
            tokens -= self.lens[start];
            start += 1;
        }
        // sentence budget counts context only; the current sentence is extra
        if let Some(max_sents) = self.budget.max_sents {
            while j - start > max_sents {
                start += 1;
            }
        }

        self.doci = start;
        self.next = j + 1;
        Some(Span { start, end: j })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.lens.len() - self.next;
        (n, Some(n))
    }
}

/// Non-overlapping partition of a document into budgeted runs.
///
/// `max_tokens == 0` disables the token cap. A sentence that alone exceeds
/// the budget becomes its own chunk.
pub struct Chunks<'a> {
    lens: &'a [usize],
    budget: Budget,
    pos: usize,
}

impl<'a> Chunks<'a> {
    pub fn new(lens: &'a [usize], budget: Budget) -> Self {
        Self { lens, budget, pos: 0 }
    }
}

impl Iterator for Chunks<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if self.pos >= self.lens.len() {
            return None;
        }

        let start = self.pos;
        let mut tokens = 0usize;
        while self.pos < self.lens.len() {
            let count = self.pos - start;
            let len = self.lens[self.pos];
            let over_tokens = self.budget.max_tokens != 0 && tokens + len > self.budget.max_tokens;
            let over_sents = self.budget.max_sents.is_some_and(|n| count >= n);
            if (over_tokens || over_sents) && count > 0 {
                break;
            }
            tokens += len;
            self.pos += 1;
        }

        Some(Span { start, end: self.pos - 1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows(lens: &[usize], max_tokens: usize, max_sents: Option<usize>) -> Vec<(usize, usize)> {
        SlidingWindows::new(lens, Budget { max_tokens, max_sents })
            .map(|s| (s.start, s.end))
            .collect()
    }

    fn chunk_sizes(lens: &[usize], max_tokens: usize, max_sents: Option<usize>) -> Vec<usize> {
        Chunks::new(lens, Budget { max_tokens, max_sents })
            .map(|s| s.len())
            .collect()
    }

    #[test]
    fn window_drops_context_that_overflows() {
        // "a b", "c d e", "f" with terminators
        assert_eq!(windows(&[3, 4, 2], 5, None), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn window_keeps_context_that_fits() {
        assert_eq!(windows(&[2, 2, 2, 2], 6, None), vec![(0, 0), (0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn window_start_never_moves_back() {
        // the long sentence pushes doci past everything before it
        let spans = windows(&[1, 1, 9, 1, 1], 10, None);
        assert_eq!(spans, vec![(0, 0), (0, 1), (1, 2), (2, 3), (3, 4)]);
        assert!(spans.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn window_sentence_budget_limits_context() {
        assert_eq!(windows(&[1; 5], 100, Some(2)), vec![(0, 0), (0, 1), (0, 2), (1, 3), (2, 4)]);
        assert_eq!(windows(&[1; 3], 100, Some(0)), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn window_token_trim_runs_before_sentence_trim() {
        // tokens leave 3 items, then the sentence cap keeps 2
        assert_eq!(windows(&[5, 1, 1, 1], 3, Some(1)), vec![(0, 0), (1, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn window_oversized_sentence_stands_alone() {
        assert_eq!(windows(&[50, 2], 10, None), vec![(0, 0), (1, 1)]);
        // zero budget leaves no room for context at all
        assert_eq!(windows(&[1, 1], 0, None), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn window_on_empty_document() {
        assert!(windows(&[], 10, None).is_empty());
    }

    #[test]
    fn chunks_by_sentence_count() {
        assert_eq!(chunk_sizes(&[1; 5], 0, Some(2)), vec![2, 2, 1]);
    }

    #[test]
    fn chunks_by_token_budget() {
        assert_eq!(chunk_sizes(&[3, 3, 3, 3], 7, None), vec![2, 2]);
        assert_eq!(chunk_sizes(&[3, 3, 3, 3], 5, None), vec![1, 1, 1, 1]);
    }

    #[test]
    fn chunk_zero_tokens_disables_cap() {
        assert_eq!(chunk_sizes(&[100, 100, 100], 0, None), vec![3]);
    }

    #[test]
    fn oversized_sentence_gets_own_chunk() {
        assert_eq!(chunk_sizes(&[2, 20, 2, 2], 10, None), vec![1, 1, 2]);
        // first sentence oversized: never an empty chunk in front of it
        assert_eq!(chunk_sizes(&[20, 2], 10, None), vec![1, 1]);
        assert_eq!(chunk_sizes(&[1, 1], 0, Some(0)), vec![1, 1]);
    }

    #[test]
    fn chunks_cover_document_in_order() {
        let lens = [3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let spans: Vec<Span> = Chunks::new(&lens, Budget { max_tokens: 8, max_sents: Some(3) }).collect();
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(lens.len() - 1));
        for w in spans.windows(2) {
            assert_eq!(w[0].end + 1, w[1].start);
        }
        for s in &spans {
            let tokens: usize = lens[s.range()].iter().sum();
            assert!(s.len() <= 3);
            assert!(tokens <= 8 || s.len() == 1);
        }
    }
}
