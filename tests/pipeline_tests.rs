//! End-to-end tests for the lazy pipeline

use std::cell::Cell;
use std::rc::Rc;

use lazyseq::prelude::*;
use lazyseq::BoxIter;

/// Producer that counts how many times it is driven and how many elements
/// have been pulled across all drives.
fn counted(values: Vec<i64>) -> (Enumerable<i64>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
    let drives = Rc::new(Cell::new(0));
    let pulls = Rc::new(Cell::new(0));
    let (d, p) = (Rc::clone(&drives), Rc::clone(&pulls));
    let e = Enumerable::from_fn(move || {
        d.set(d.get() + 1);
        let p = Rc::clone(&p);
        values.clone().into_iter().inspect(move |_| p.set(p.get() + 1))
    });
    (e, drives, pulls)
}

/// Host sequence that only answers length natively and records probes.
struct SizedOnly {
    items: Vec<u32>,
    len_probes: Cell<usize>,
}

impl Sequence<u32> for SizedOnly {
    fn drive(&self) -> BoxIter<u32> {
        Box::new(self.items.clone().into_iter())
    }

    fn native_len(&self) -> Probe<usize> {
        self.len_probes.set(self.len_probes.get() + 1);
        Probe::Native(self.items.len())
    }

    fn name(&self) -> &'static str {
        "sized-only"
    }
}

#[test]
fn test_building_a_chain_is_free() {
    let (e, drives, pulls) = counted(vec![1, 2, 3, 4]);
    let chain = e
        .filter(|x| x % 2 == 0)
        .select(|x| x * 3)
        .concat(&Enumerable::range(100, 2).unwrap())
        .skip(1);
    assert_eq!(drives.get(), 0);
    assert_eq!(pulls.get(), 0);
    assert_eq!(chain.to_vec(), vec![12, 100, 101]);
    assert_eq!(drives.get(), 1);
}

#[test]
fn test_redriving_a_node_is_idempotent() {
    let (e, drives, _) = counted(vec![5, 1, 4]);
    let node = e.select(|x| x + 1).order_by(|x| *x);
    let first = node.to_vec();
    let second = node.to_vec();
    assert_eq!(first, vec![2, 5, 6]);
    assert_eq!(first, second);
    assert_eq!(drives.get(), 2);
}

#[test]
fn test_take_short_circuits_upstream() {
    let (e, _, pulls) = counted((0..1000).collect());
    assert_eq!(e.filter(|x| x % 10 == 0).take(3).to_vec(), vec![0, 10, 20]);
    assert_eq!(pulls.get(), 21);
}

#[test]
fn test_distinct_keeps_first_occurrence() {
    let e = Enumerable::from_vec(vec![1, 4, 5, 6, 4, 3, 1, 99]);
    assert_eq!(e.distinct().to_vec(), vec![1, 4, 5, 6, 3, 99]);
}

#[test]
fn test_single_outcomes() {
    assert_eq!(
        Enumerable::from_vec(vec![5, 6]).single(),
        Err(QueryError::NotUnique)
    );
    assert_eq!(Enumerable::from_vec(vec![5]).single(), Ok(5));
    assert_eq!(
        Enumerable::from_vec(Vec::<i32>::new()).single(),
        Err(QueryError::EmptySequence)
    );
}

#[test]
fn test_ranges() {
    assert_eq!(
        Enumerable::range(-5, 6).unwrap().to_vec(),
        vec![-5, -4, -3, -2, -1, 0]
    );
    assert_eq!(
        Enumerable::range_from(0).select(|x| x * x).take(4).to_vec(),
        vec![0, 1, 4, 9]
    );
    assert!(matches!(
        Enumerable::repeat(1, -1),
        Err(QueryError::InvalidArgument(_))
    ));
}

#[test]
fn test_select_many_and_join_preserve_order() {
    let owners = Enumerable::from_vec(vec![("ann", vec!["rex", "kit"]), ("bob", vec![]), ("cid", vec!["tom"])]);
    let pets = owners.select_many_with(|o| o.1.clone(), |o, p| format!("{}/{}", o.0, p));
    assert_eq!(pets.to_vec(), vec!["ann/rex", "ann/kit", "cid/tom"]);

    let orders = Enumerable::from_vec(vec![(1, "pen"), (2, "ink"), (1, "pad")]);
    let customers = Enumerable::from_vec(vec![(2, "zoe"), (1, "yan"), (3, "xia")]);
    let joined = customers.join(&orders, |c| c.0, |o| o.0, |c, o| (c.1, o.1));
    assert_eq!(joined.to_vec(), vec![("zoe", "ink"), ("yan", "pen"), ("yan", "pad")]);

    let per_customer = customers.group_join(&orders, |c| c.0, |o| o.0, |c, os| (c.1, os.count()));
    assert_eq!(per_customer.to_vec(), vec![("zoe", 1), ("yan", 2), ("xia", 0)]);
}

#[test]
fn test_set_operators_follow_left_order() {
    let left = Enumerable::from_vec(vec!["b", "a", "c", "a"]);
    let right = Enumerable::from_vec(vec!["c", "d", "b"]);
    assert_eq!(left.union(&right).to_vec(), vec!["b", "a", "c", "d"]);
    assert_eq!(left.intersect(&right).to_vec(), vec!["b", "c"]);
    assert_eq!(left.except(&right).to_vec(), vec!["a"]);
}

#[test]
fn test_native_length_is_preferred() {
    let seq = Rc::new(SizedOnly {
        items: vec![7, 8, 9],
        len_probes: Cell::new(0),
    });
    let e = Enumerable::from_sequence(SizedOnlyHandle(Rc::clone(&seq)));
    assert_eq!(e.count(), 3);
    assert_eq!(seq.len_probes.get(), 1);
    // No native indexing: falls back to traversal.
    assert_eq!(e.element_at(2), Ok(9));
    assert_eq!(e.element_at(3), Err(QueryError::IndexOutOfRange { index: 3 }));
    // Derived nodes lose the capability and traverse.
    assert_eq!(e.filter(|x| *x > 7).count(), 2);
    assert_eq!(seq.len_probes.get(), 1);
}

/// Shares a `SizedOnly` so the test can inspect its probe counter.
struct SizedOnlyHandle(Rc<SizedOnly>);

impl Sequence<u32> for SizedOnlyHandle {
    fn drive(&self) -> BoxIter<u32> {
        self.0.drive()
    }

    fn native_len(&self) -> Probe<usize> {
        self.0.native_len()
    }

    fn name(&self) -> &'static str {
        self.0.name()
    }
}

#[test]
fn test_tail_windows_and_reverse() {
    let e = Enumerable::range(1, 6).unwrap();
    assert_eq!(e.take_last(2).to_vec(), vec![5, 6]);
    assert_eq!(e.skip_last(4).to_vec(), vec![1, 2]);
    assert_eq!(e.reverse().take(2).to_vec(), vec![6, 5]);
    assert_eq!(e.zip(&e.reverse()).select(|(a, b)| a + b).distinct().to_vec(), vec![7]);
}

#[test]
fn test_checked_cast_reports_position() {
    let e = Enumerable::from_vec(vec![10i64, 300, -1]);
    let bytes: Vec<_> = e.cast::<u8>().to_vec();
    assert_eq!(bytes[0], Ok(10u8));
    assert_eq!(bytes[1], Err(QueryError::InvalidCast { position: 1 }));
    assert_eq!(bytes[2], Err(QueryError::InvalidCast { position: 2 }));
    assert_eq!(e.of_type::<u8>().to_vec(), vec![10u8]);
}
