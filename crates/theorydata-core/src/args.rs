use std::fmt;

use crate::param::{Argument, Param};

/// Highest number of argument slots a test case can carry.
pub const MAX_ARITY: usize = 9;

/// An ordered, fixed-size list of typed argument slots.
///
/// Implemented for `()` and for tuples of up to [`MAX_ARITY`] elements.
/// A slot is nullable when its type is an `Option<T>`.
pub trait ArgList: fmt::Debug + Clone + Send + Sync + 'static {
    /// Number of slots.
    const ARITY: usize;

    /// Returns the slots as params, `Arg1` first.
    fn to_params(&self) -> Vec<Param>;
}

impl ArgList for () {
    const ARITY: usize = 0;

    fn to_params(&self) -> Vec<Param> {
        Vec::new()
    }
}

macro_rules! impl_arg_list {
    ($arity:expr => $($T:ident . $idx:tt),+) => {
        impl<$($T),+> ArgList for ($($T,)+)
        where
            $($T: Argument + Clone,)+
        {
            const ARITY: usize = $arity;

            fn to_params(&self) -> Vec<Param> {
                vec![$(Param::new(self.$idx.clone())),+]
            }
        }
    };
}

impl_arg_list!(1 => T1.0);
impl_arg_list!(2 => T1.0, T2.1);
impl_arg_list!(3 => T1.0, T2.1, T3.2);
impl_arg_list!(4 => T1.0, T2.1, T3.2, T4.3);
impl_arg_list!(5 => T1.0, T2.1, T3.2, T4.3, T5.4);
impl_arg_list!(6 => T1.0, T2.1, T3.2, T4.3, T5.4, T6.5);
impl_arg_list!(7 => T1.0, T2.1, T3.2, T4.3, T5.4, T6.5, T7.6);
impl_arg_list!(8 => T1.0, T2.1, T3.2, T4.3, T5.4, T6.5, T7.6, T8.7);
impl_arg_list!(9 => T1.0, T2.1, T3.2, T4.3, T5.4, T6.5, T7.6, T8.7, T9.8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_constants() {
        assert_eq!(<() as ArgList>::ARITY, 0);
        assert_eq!(<(i32,) as ArgList>::ARITY, 1);
        assert_eq!(<(u8, u8, u8, u8, u8, u8, u8, u8, u8) as ArgList>::ARITY, MAX_ARITY);
    }

    #[test]
    fn test_to_params_preserves_order() {
        let params = (1_i32, "two", Some(3.0_f64)).to_params();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].downcast_ref::<i32>(), Some(&1));
        assert_eq!(params[1].downcast_ref::<&str>(), Some(&"two"));
        assert_eq!(params[2].downcast_ref::<Option<f64>>(), Some(&Some(3.0)));
    }
}
