use nalgebra::Matrix;
use num::Float;

/// In-place vector-space operations used to apply gradients to model parameters
pub trait NeuraVectorSpace {
    fn add_assign(&mut self, other: &Self);

    fn mul_assign(&mut self, by: f64);

    fn norm_squared(&self) -> f64;

    /// Computes `self += by * other`, the shape of every SGD step.
    fn add_scaled(&mut self, other: &Self, by: f64)
    where
        Self: Clone,
    {
        let mut scaled = other.clone();
        scaled.mul_assign(by);
        self.add_assign(&scaled);
    }
}

impl<F: Float, R: nalgebra::Dim, C: nalgebra::Dim, S: nalgebra::RawStorage<F, R, C>>
    NeuraVectorSpace for Matrix<F, R, C, S>
where
    Matrix<F, R, C, S>: std::ops::MulAssign<F>,
    for<'c> Matrix<F, R, C, S>: std::ops::AddAssign<&'c Matrix<F, R, C, S>>,
{
    fn add_assign(&mut self, other: &Self) {
        *self += other;
    }

    fn mul_assign(&mut self, by: f64) {
        *self *= F::from(by).unwrap_or_else(F::nan);
    }

    fn norm_squared(&self) -> f64 {
        self.iter()
            .map(|x| *x * *x)
            .fold(F::zero(), |sum, curr| sum + curr)
            .to_f64()
            .unwrap_or(0.0)
    }
}

macro_rules! base {
    ( $type:ty ) => {
        impl NeuraVectorSpace for $type {
            fn add_assign(&mut self, other: &Self) {
                std::ops::AddAssign::add_assign(self, other);
            }

            fn mul_assign(&mut self, other: f64) {
                std::ops::MulAssign::mul_assign(self, other as $type);
            }

            fn norm_squared(&self) -> f64 {
                (self * self) as f64
            }
        }
    };
}

base!(f32);
base!(f64);
