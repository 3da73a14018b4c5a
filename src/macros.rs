/// Implements [`MatrixDataType`](crate::MatrixDataType) and [`IsNaN`](crate::IsNaN)
/// for a primitive float type and generates a smoke test for the kernel with it.
#[macro_export]
#[doc(hidden)]
macro_rules! impl_matrix_data_type {
    ($type_name:ident) => {
        impl $crate::MatrixDataType for $type_name {
            #[inline(always)]
            fn recip(self) -> Self {
                <$type_name>::recip(self)
            }
        }

        impl $crate::IsNaN for $type_name {
            #[inline(always)]
            fn is_nan(&self) -> bool {
                <$type_name>::is_nan(*self)
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:lower>] {
                use $crate::{cholesky, Matrix, MatrixDataType};

                #[test]
                fn test_recip() {
                    let value: $type_name = 4.0;
                    assert_eq!(MatrixDataType::recip(value), 0.25);
                }

                #[test]
                fn test_inverse_roundtrip() {
                    let mut original: [$type_name; 4] = [4.0, 2.0, 2.0, 3.0];
                    let mut decomposed = original;
                    let mut inverse: [$type_name; 4] = [0.0; 4];
                    let mut product: [$type_name; 4] = [0.0; 4];
                    let mut aux: [$type_name; 2] = [0.0; 2];

                    let mut l = Matrix::new(2, 2, &mut decomposed);
                    let mut inv = Matrix::new(2, 2, &mut inverse);
                    assert!(cholesky::decompose_lower(&mut l).is_ok());
                    cholesky::invert_lower(&l, &mut inv);

                    let m = Matrix::new(2, 2, &mut original);
                    let mut c = Matrix::new(2, 2, &mut product);
                    m.multiply(&inv, &mut c, &mut aux);

                    approx::assert_abs_diff_eq!(c.get(0, 0), 1.0, epsilon = 1e-5);
                    approx::assert_abs_diff_eq!(c.get(0, 1), 0.0, epsilon = 1e-5);
                    approx::assert_abs_diff_eq!(c.get(1, 0), 0.0, epsilon = 1e-5);
                    approx::assert_abs_diff_eq!(c.get(1, 1), 1.0, epsilon = 1e-5);
                }
            }
        }
    };
}
