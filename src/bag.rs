use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::iter::repeat;

/// An immutable multiset.
///
/// Elements are kept sorted, so two bags holding the same elements with the same
/// multiplicities are equal no matter how they were built.
///
/// # JSON
/// A bag is serialized as the sorted array of its elements.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SortedBag<T> {
    items: Vec<T>,
}

impl<T: Ord> SortedBag<T> {
    /// The empty bag.
    #[inline]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// A bag holding `count` copies of `item`.
    ///
    /// # Example
    /// ```
    /// use rail_network::bag::SortedBag;
    /// use rail_network::card::Card;
    ///
    /// let bag = SortedBag::of(3, Card::Red);
    /// assert_eq!(bag.len(), 3);
    /// assert_eq!(bag.count_of(&Card::Red), 3);
    /// assert!(SortedBag::of(0, Card::Red).is_empty());
    /// ```
    pub fn of(count: usize, item: T) -> Self
    where
        T: Clone,
    {
        Self {
            items: repeat(item).take(count).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Multiplicity of `item` in this bag.
    pub fn count_of(&self, item: &T) -> usize {
        let start = self.items.partition_point(|other| other < item);
        let end = self.items.partition_point(|other| other <= item);
        end - start
    }

    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.items.binary_search(item).is_ok()
    }

    /// Whether every element of `other` appears in this bag, at least as many times.
    ///
    /// # Example
    /// ```
    /// use rail_network::bag::SortedBag;
    /// use rail_network::card::Card;
    ///
    /// let hand: SortedBag<Card> = [Card::Red, Card::Red, Card::Locomotive].into_iter().collect();
    /// assert!(hand.contains_all(&SortedBag::of(2, Card::Red)));
    /// assert!(!hand.contains_all(&SortedBag::of(3, Card::Red)));
    /// assert!(hand.contains_all(&SortedBag::new()));
    /// ```
    pub fn contains_all(&self, other: &SortedBag<T>) -> bool {
        let mut mine = self.items.iter();
        'wanted: for wanted in &other.items {
            for item in mine.by_ref() {
                if item == wanted {
                    continue 'wanted;
                }
                if item > wanted {
                    return false;
                }
            }
            return false;
        }
        true
    }

    /// The bag holding the elements of both bags, multiplicities being added.
    pub fn union(&self, other: &SortedBag<T>) -> Self
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend(self.items.iter().cloned());
        items.extend(other.items.iter().cloned());
        items.sort();
        Self { items }
    }

    /// This bag with one occurrence removed for every occurrence in `other`.
    /// Elements of `other` absent from this bag are ignored.
    pub fn difference(&self, other: &SortedBag<T>) -> Self
    where
        T: Clone,
    {
        let mut removed = other.items.iter().peekable();
        let mut items = Vec::with_capacity(self.len());
        for item in &self.items {
            while removed.next_if(|candidate| *candidate < item).is_some() {}
            if removed.next_if(|candidate| *candidate == item).is_none() {
                items.push(item.clone());
            }
        }
        Self { items }
    }

    /// Iterates over all elements, in ascending order, repetitions included.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates over the distinct elements, in ascending order, with their multiplicity.
    pub fn counts(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        EqualRuns { rest: &self.items }.map(|run| (&run[0], run.len()))
    }

    /// Number of distinct elements.
    pub fn distinct_count(&self) -> usize {
        self.counts().count()
    }

    /// The element at `index` in ascending order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }
}

/// Splits a sorted slice into runs of equal elements.
struct EqualRuns<'a, T> {
    rest: &'a [T],
}

impl<'a, T: PartialEq> Iterator for EqualRuns<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.first()?;
        let run_len = self.rest.iter().take_while(|item| *item == first).count();
        let (run, rest) = self.rest.split_at(run_len);
        self.rest = rest;
        Some(run)
    }
}

impl<T: Ord> Default for SortedBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<Vec<T>> for SortedBag<T> {
    fn from(mut items: Vec<T>) -> Self {
        items.sort();
        Self { items }
    }
}

impl<T: Ord> FromIterator<T> for SortedBag<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> IntoIterator for SortedBag<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SortedBag<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for SortedBag<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for SortedBag<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
