//! Cartesian product over attribute value lists

/// Every ordered tuple taking one element per list, depth-first
///
/// The first list varies slowest, matching nested loops in declared order.
/// No lists yield a single empty tuple; any empty list yields nothing.
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut out = Vec::with_capacity(lists.iter().map(Vec::len).product());
    let mut current = Vec::with_capacity(lists.len());
    expand(lists, &mut current, &mut out);
    out
}

fn expand<T: Clone>(lists: &[Vec<T>], current: &mut Vec<T>, out: &mut Vec<Vec<T>>) {
    let Some((head, rest)) = lists.split_first() else {
        out.push(current.clone());
        return;
    };
    for item in head {
        current.push(item.clone());
        expand(rest, current, out);
        current.pop();
    }
}
