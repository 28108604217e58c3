//! Type-erased values passed from one step to the next.

use std::any::Any;

/// A value produced by a step, boxed so steps with different output types
/// can live in one sequence.
pub(crate) type Carried = Box<dyn CarriedValue>;

pub(crate) trait CarriedValue: Any + Send {
    fn clone_box(&self) -> Carried;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<T> CarriedValue for T
where
    T: Any + Clone + Send,
{
    fn clone_box(&self) -> Carried {
        Box::new(self.clone())
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Wraps a typed value for the carrier.
pub(crate) fn carry<T>(value: T) -> Carried
where
    T: Any + Clone + Send,
{
    Box::new(value)
}

/// Recovers the typed value from the carrier.
///
/// `SagaBuilder::then` only accepts a step whose input type equals the
/// previous output type, so the downcast cannot fail for a built saga.
pub(crate) fn take<T: Any>(value: Carried) -> T {
    match value.into_any().downcast::<T>() {
        Ok(typed) => *typed,
        Err(_) => unreachable!(
            "saga builder guarantees the carried type is {}",
            std::any::type_name::<T>()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_the_carried_value() {
        let carried = carry(String::from("order"));
        assert_eq!(take::<String>(carried), "order");
    }

    #[test]
    fn clone_box_produces_an_independent_copy() {
        let original = carry(vec![1, 2, 3]);
        let copy = original.clone_box();
        assert_eq!(take::<Vec<i32>>(original), vec![1, 2, 3]);
        assert_eq!(take::<Vec<i32>>(copy), vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "saga builder guarantees")]
    fn take_with_wrong_type_panics() {
        let carried = carry(5_u8);
        let _ = take::<String>(carried);
    }
}
