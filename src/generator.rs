//! Lazy, restartable value generators.
//!
//! A [`Generator`] is an immutable description of a (possibly very large)
//! sequence of [`Sample`]s. Calling [`Generator::iter`] starts a fresh cursor
//! over that sequence; cursors hold only the state needed to produce the next
//! item, so taking a short prefix of a huge combinatorial space is cheap.
//!
//! # Enumeration order
//!
//! - **Choice**: each option's items in declared order.
//! - **CrossProduct**: odometer order, the last part varies fastest.
//! - **Permutation**: index orderings in lexicographic order (`0,1,2`,
//!   `0,2,1`, `1,0,2`, ...); each ordering yields the cross-product of the
//!   parts in that order.
//! - **Subset**: non-empty subsets by increasing size, then lexicographically
//!   by index (`{0}`, `{1}`, `{2}`, `{0,1}`, `{0,2}`, `{1,2}`, `{0,1,2}`); each
//!   subset yields the cross-product of its members in declared order.
//! - **Repeat**: for each count `k` from `min` to `max`, the k-fold
//!   cross-product of the inner generator with itself.

use std::iter;

/// One produced value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    Text(String),
    /// Ordered sub-values; empty when a repetition chose zero items
    Seq(Vec<Sample>),
}

impl Sample {
    /// All text fragments in order, with nesting removed.
    pub fn flatten(&self) -> Vec<&str> {
        let mut parts = vec![];
        self.flatten_into(&mut parts);
        parts
    }

    fn flatten_into<'a>(&'a self, parts: &mut Vec<&'a str>) {
        match self {
            Sample::Text(text) => parts.push(text),
            Sample::Seq(items) => {
                for item in items {
                    item.flatten_into(parts);
                }
            }
        }
    }

    /// Rendered text: empty fragments dropped, the rest joined by single
    /// spaces, leading whitespace removed.
    pub fn render(&self) -> String {
        let parts: Vec<&str> = self
            .flatten()
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        parts.join(" ").trim_start().to_string()
    }
}

/// A cursor over generated samples.
pub type Samples<'a> = Box<dyn Iterator<Item = Sample> + 'a>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generator {
    /// A single text value
    Literal(String),
    /// Exactly one of the options
    Choice(Vec<Generator>),
    /// One or more of the parts, in declared order
    Subset(Vec<Generator>),
    /// All of the parts, in every order
    Permutation(Vec<Generator>),
    /// All of the parts, in declared order
    CrossProduct(Vec<Generator>),
    /// Between `min` and `max` ordered draws from `inner`
    Repeat {
        inner: Box<Generator>,
        min: usize,
        max: usize,
    },
    /// At most the first `count` items of `inner`
    Limit { inner: Box<Generator>, count: usize },
}

impl Generator {
    pub fn literal(text: impl Into<String>) -> Self {
        Generator::Literal(text.into())
    }

    pub fn repeat(inner: Generator, min: usize, max: usize) -> Self {
        Generator::Repeat {
            inner: Box::new(inner),
            min,
            max,
        }
    }

    /// Starts a new enumeration from the first item.
    pub fn iter(&self) -> Samples<'_> {
        match self {
            Generator::Literal(text) => Box::new(iter::once(Sample::Text(text.clone()))),
            Generator::Choice(options) => Box::new(options.iter().flat_map(Generator::iter)),
            Generator::CrossProduct(parts) => Box::new(Product::new(parts.iter().collect())),
            Generator::Permutation(parts) => {
                Box::new(IndexPermutations::new(parts.len()).flat_map(move |order| {
                    Product::new(order.into_iter().map(move |i| &parts[i]).collect())
                }))
            }
            Generator::Subset(parts) => {
                Box::new(IndexSubsets::new(parts.len()).flat_map(move |members| {
                    Product::new(members.into_iter().map(move |i| &parts[i]).collect())
                }))
            }
            Generator::Repeat { inner, min, max } => {
                let inner = inner.as_ref();
                Box::new((*min..=*max).flat_map(move |count| Product::new(vec![inner; count])))
            }
            Generator::Limit { inner, count } => Box::new(inner.iter().take(*count)),
        }
    }

    /// Exact number of items an enumeration produces, or `None` when it does
    /// not fit in a `u64`.
    pub fn size(&self) -> Option<u64> {
        match self {
            Generator::Literal(_) => Some(1),
            Generator::Choice(options) => options
                .iter()
                .try_fold(0u64, |acc, g| acc.checked_add(g.size()?)),
            Generator::CrossProduct(parts) => product_size(parts),
            Generator::Permutation(parts) => {
                let orderings =
                    (1..=parts.len() as u64).try_fold(1u64, |acc, n| acc.checked_mul(n))?;
                orderings.checked_mul(product_size(parts)?)
            }
            Generator::Subset(parts) => {
                // Each part is either absent or contributes one of its items;
                // the all-absent choice is excluded.
                let total = parts
                    .iter()
                    .try_fold(1u64, |acc, g| acc.checked_mul(g.size()?.checked_add(1)?))?;
                Some(total - 1)
            }
            Generator::Repeat { inner, min, max } => repeat_size(inner.size()?, *min, *max),
            Generator::Limit { inner, count } => {
                let limit = *count as u64;
                Some(inner.size().map_or(limit, |n| n.min(limit)))
            }
        }
    }
}

fn product_size(parts: &[Generator]) -> Option<u64> {
    parts
        .iter()
        .try_fold(1u64, |acc, g| acc.checked_mul(g.size()?))
}

/// `base^min + ... + base^max`, or `None` when it does not fit in a `u64`.
fn repeat_size(base: u64, min: usize, max: usize) -> Option<u64> {
    match base {
        0 => Some(u64::from(min == 0)),
        1 => u64::try_from(max - min).ok()?.checked_add(1),
        _ => {
            // base^(max + 1) only exceeds u128 when base^max alone exceeds u64.
            let base = u128::from(base);
            let high = base.checked_pow(u32::try_from(max.checked_add(1)?).ok()?)?;
            let low = base.checked_pow(u32::try_from(min).ok()?)?;
            u64::try_from((high - low) / (base - 1)).ok()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductState {
    Fresh,
    Running,
    Done,
}

/// Odometer over the cross-product of `parts`.
///
/// Exhausted positions are restarted through [`Generator::iter`], so only one
/// cursor per part is alive at a time.
struct Product<'a> {
    parts: Vec<&'a Generator>,
    cursors: Vec<Samples<'a>>,
    current: Vec<Sample>,
    state: ProductState,
}

impl<'a> Product<'a> {
    fn new(parts: Vec<&'a Generator>) -> Self {
        Product {
            parts,
            cursors: vec![],
            current: vec![],
            state: ProductState::Fresh,
        }
    }

    fn start(&mut self) -> Option<Sample> {
        self.cursors = self.parts.iter().map(|&g| g.iter()).collect();
        let mut current = Vec::with_capacity(self.parts.len());
        for cursor in &mut self.cursors {
            current.push(cursor.next()?);
        }
        self.current = current;
        self.state = ProductState::Running;
        Some(Sample::Seq(self.current.clone()))
    }

    fn step(&mut self) -> Option<Sample> {
        let mut position = self.cursors.len();
        loop {
            if position == 0 {
                return None;
            }
            position -= 1;

            if let Some(sample) = self.cursors[position].next() {
                self.current[position] = sample;
                break;
            }

            // Wrap this position around and carry into the one before it.
            let part: &'a Generator = self.parts[position];
            self.cursors[position] = part.iter();
            self.current[position] = self.cursors[position].next()?;
        }
        Some(Sample::Seq(self.current.clone()))
    }
}

impl Iterator for Product<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let sample = match self.state {
            ProductState::Done => None,
            ProductState::Fresh => self.start(),
            ProductState::Running => self.step(),
        };
        if sample.is_none() {
            self.state = ProductState::Done;
            self.cursors.clear();
        }
        sample
    }
}

/// Permutations of `0..n` in lexicographic order.
struct IndexPermutations {
    next: Option<Vec<usize>>,
}

impl IndexPermutations {
    fn new(n: usize) -> Self {
        IndexPermutations {
            next: Some((0..n).collect()),
        }
    }
}

impl Iterator for IndexPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;

        let mut following = current.clone();
        // Standard next-permutation: find the rightmost ascent, swap with the
        // smallest larger element to its right, reverse the tail.
        if let Some(pivot) = (1..following.len())
            .rev()
            .find(|&i| following[i - 1] < following[i])
            .map(|i| i - 1)
        {
            let successor = (pivot + 1..following.len())
                .rev()
                .find(|&j| following[j] > following[pivot])
                .unwrap_or(pivot + 1);
            following.swap(pivot, successor);
            following[pivot + 1..].reverse();
            self.next = Some(following);
        }

        Some(current)
    }
}

/// Non-empty subsets of `0..n`, by size then lexicographically.
struct IndexSubsets {
    n: usize,
    next: Option<Vec<usize>>,
}

impl IndexSubsets {
    fn new(n: usize) -> Self {
        IndexSubsets {
            n,
            next: (n > 0).then(|| vec![0]),
        }
    }
}

impl Iterator for IndexSubsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let size = current.len();

        // Advance to the next combination of the same size, or to the first
        // combination of the next size.
        let mut following = current.clone();
        let advanced = (0..size).rev().find(|&i| following[i] < self.n - size + i);
        self.next = match advanced {
            Some(i) => {
                following[i] += 1;
                for j in i + 1..size {
                    following[j] = following[j - 1] + 1;
                }
                Some(following)
            }
            None if size < self.n => Some((0..=size).collect()),
            None => None,
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(generator: &Generator) -> Vec<String> {
        generator.iter().map(|s| s.render()).collect()
    }

    fn words(words: &[&str]) -> Vec<Generator> {
        words.iter().map(|w| Generator::literal(*w)).collect()
    }

    #[test]
    fn test_index_permutations() {
        let orders: Vec<Vec<usize>> = IndexPermutations::new(3).collect();
        assert_eq!(
            orders,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_index_subsets() {
        let subsets: Vec<Vec<usize>> = IndexSubsets::new(3).collect();
        assert_eq!(
            subsets,
            vec![
                vec![0],
                vec![1],
                vec![2],
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2],
            ]
        );
        assert_eq!(IndexSubsets::new(0).count(), 0);
    }

    #[test]
    fn test_cross_product_order() {
        let generator = Generator::CrossProduct(vec![
            Generator::Choice(words(&["a", "b"])),
            Generator::Choice(words(&["1", "2"])),
        ]);
        assert_eq!(rendered(&generator), vec!["a 1", "a 2", "b 1", "b 2"]);
    }

    #[test]
    fn test_empty_part_empties_product() {
        let generator = Generator::CrossProduct(vec![
            Generator::literal("a"),
            Generator::Choice(vec![]),
        ]);
        assert_eq!(generator.iter().count(), 0);
        assert_eq!(generator.size(), Some(0));
    }

    #[test]
    fn test_zero_repeat_is_one_empty_item() {
        let generator = Generator::repeat(Generator::literal("a"), 0, 0);
        assert_eq!(generator.iter().collect::<Vec<_>>(), vec![Sample::Seq(vec![])]);
        assert_eq!(rendered(&generator), vec![""]);
    }

    #[test]
    fn test_sizes_match_enumeration() {
        let generators = vec![
            Generator::Subset(words(&["a", "b", "c"])),
            Generator::Permutation(words(&["a", "b", "c"])),
            Generator::repeat(Generator::Choice(words(&["x", "y"])), 1, 3),
            Generator::Limit {
                inner: Box::new(Generator::Choice(words(&["a", "b", "c"]))),
                count: 2,
            },
        ];
        for generator in generators {
            assert_eq!(generator.size(), Some(generator.iter().count() as u64));
        }
    }

    #[test]
    fn test_repeat_size_closed_form() {
        let a = || Generator::literal("a");
        let xy = || Generator::Choice(words(&["x", "y"]));

        assert_eq!(Generator::repeat(a(), 0, 4_000_000_000).size(), Some(4_000_000_001));
        assert_eq!(Generator::repeat(a(), 7, 7).size(), Some(1));
        assert_eq!(Generator::repeat(Generator::Choice(vec![]), 0, 9).size(), Some(1));
        assert_eq!(Generator::repeat(Generator::Choice(vec![]), 1, 9).size(), Some(0));
        assert_eq!(Generator::repeat(xy(), 2, 4).size(), Some(4 + 8 + 16));
        // 2^0 + ... + 2^63 is exactly u64::MAX
        assert_eq!(Generator::repeat(xy(), 0, 63).size(), Some(u64::MAX));
        assert_eq!(Generator::repeat(xy(), 0, 64).size(), None);
        assert_eq!(Generator::repeat(xy(), 0, 4_000_000_000).size(), None);
    }

    #[test]
    fn test_render_filters_empty_fragments() {
        let sample = Sample::Seq(vec![
            Sample::Seq(vec![]),
            Sample::Text(String::new()),
            Sample::Seq(vec![Sample::Text("bold".into())]),
            Sample::Text("red".into()),
        ]);
        assert_eq!(sample.flatten(), vec!["", "bold", "red"]);
        assert_eq!(sample.render(), "bold red");
    }
}
