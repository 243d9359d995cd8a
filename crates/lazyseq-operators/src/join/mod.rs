//! Hash joins.
//!
//! Each drive builds a [`Lookup`] over the inner sequence, then streams the
//! outer sequence against it. Output follows outer order, and within one
//! outer element, the inner grouping's order.

use std::hash::Hash;
use std::rc::Rc;

use lazyseq_core::key_index::HashIndex;

use crate::enumerable::Enumerable;
use crate::group::Lookup;

impl<T: 'static> Enumerable<T> {
    /// Inner equi-join. Outer elements without a match are skipped.
    pub fn join<U, K, R, FO, FI, H>(
        &self,
        inner: &Enumerable<U>,
        outer_key: FO,
        inner_key: FI,
        result: H,
    ) -> Enumerable<R>
    where
        U: 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        H: Fn(&T, &U) -> R + 'static,
    {
        let restartable = inner.is_restartable();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        self.derive(move |outer| {
            let lookup = Lookup::build(inner.iter(), HashIndex::<K>::new(), &*inner_key, |x| x);
            let outer_key = Rc::clone(&outer_key);
            let result = Rc::clone(&result);
            Box::new(outer.flat_map(move |o| {
                let members = lookup.get(&outer_key(&o)).into_parts().1;
                let result = Rc::clone(&result);
                (0..members.len()).map(move |i| result(&o, &members[i]))
            }))
        })
        .restartable_with(restartable)
    }

    /// Exactly one result per outer element, paired with its (possibly
    /// empty) inner matches.
    pub fn group_join<U, K, R, FO, FI, H>(
        &self,
        inner: &Enumerable<U>,
        outer_key: FO,
        inner_key: FI,
        result: H,
    ) -> Enumerable<R>
    where
        U: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        FO: Fn(&T) -> K + 'static,
        FI: Fn(&U) -> K + 'static,
        H: Fn(T, Enumerable<U>) -> R + 'static,
    {
        let restartable = inner.is_restartable();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        self.derive(move |outer| {
            let lookup = Lookup::build(inner.iter(), HashIndex::<K>::new(), &*inner_key, |x| x);
            let outer_key = Rc::clone(&outer_key);
            let result = Rc::clone(&result);
            Box::new(outer.map(move |o| {
                let matches = lookup.get(&outer_key(&o)).to_enumerable();
                result(o, matches)
            }))
        })
        .restartable_with(restartable)
    }
}
