use crate::network::{Id, Railway};

/// First railway whose endpoints equal `a` and `b` in either order.
pub fn find_connecting_railway<'a>(a: &str, b: &str, railways: &'a [Railway]) -> Option<&'a Railway> {
    railways.iter().find(|railway| railway.connects(a, b))
}

/// A route is valid when it has at least two stops and every consecutive
/// pair is joined by a direct railway. No indirect paths are searched for.
pub fn validate_route<S: AsRef<str>>(stops: &[S], railways: &[Railway]) -> bool {
    if stops.len() < 2 {
        return false;
    }
    stops.windows(2).all(|pair| {
        find_connecting_railway(pair[0].as_ref(), pair[1].as_ref(), railways).is_some()
    })
}

/// `[start, end]` when the two are directly connected, otherwise empty.
pub fn find_simple_route(start: &Id, end: &Id, railways: &[Railway]) -> Vec<Id> {
    match find_connecting_railway(start, end, railways) {
        Some(_) => vec![start.clone(), end.clone()],
        None => vec![],
    }
}
