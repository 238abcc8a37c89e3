//! Argument packs: ordered values indexable by runtime position.
//!
//! Tuples map a runtime index to a compile-time position with a linear search
//! over their fields, so mixed types need no boxing or allocation. Slices,
//! arrays and vectors cover the homogeneous case, and `[&dyn FormatValue]`
//! covers mixed types whose count is only known at runtime.

use crate::error::FormatError;
use crate::value::FormatValue;

/// An ordered, fixed-size collection of formattable values.
pub trait ArgPack {
    /// Number of values in the pack.
    fn len(&self) -> usize;

    /// Returns true if the pack holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the rendering of the value at `index` to `out`.
    ///
    /// Callers check `index < self.len()` first. An out-of-range index
    /// reports [`FormatError::OutOfRangeReference`] without touching `out`.
    fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError>;
}

impl ArgPack for () {
    #[inline]
    fn len(&self) -> usize {
        0
    }

    fn render_at(&self, index: usize, _: &mut String) -> Result<(), FormatError> {
        Err(FormatError::OutOfRangeReference { index, count: 0 })
    }
}

macro_rules! impl_tuple_pack {
    () => {};

    ($head:ident $(, $tail:ident)*) => {
        impl_tuple_pack!(@impl $head $(, $tail)*);
        impl_tuple_pack!($($tail),*);
    };

    (@impl $($ty:ident),+) => {
        impl<$($ty,)+> ArgPack for ($($ty,)+)
        where
            $($ty: FormatValue,)+
        {
            #[inline]
            fn len(&self) -> usize {
                [$(stringify!($ty)),+].len()
            }

            #[allow(non_snake_case)]
            fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError> {
                let ($($ty,)+) = self;
                let mut position = 0usize;
                $(
                    if index == position {
                        return $ty.append_to(out);
                    }
                    position += 1;
                )+
                Err(FormatError::OutOfRangeReference {
                    index,
                    count: position,
                })
            }
        }
    };
}

impl_tuple_pack!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);

impl<T: FormatValue> ArgPack for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError> {
        match self.get(index) {
            Some(value) => value.append_to(out),
            None => Err(FormatError::OutOfRangeReference {
                index,
                count: <[T]>::len(self),
            }),
        }
    }
}

impl<T: FormatValue, const N: usize> ArgPack for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError> {
        self.as_slice().render_at(index, out)
    }
}

impl<T: FormatValue> ArgPack for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError> {
        self.as_slice().render_at(index, out)
    }
}

impl<P: ArgPack + ?Sized> ArgPack for &P {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn render_at(&self, index: usize, out: &mut String) -> Result<(), FormatError> {
        (**self).render_at(index, out)
    }
}
