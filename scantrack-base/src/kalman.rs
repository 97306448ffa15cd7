use nalgebra::{SMatrix, SVector};

use crate::Error;

/// Mean and covariance of a multivariate normal belief.
#[derive(Debug, Clone, PartialEq)]
pub struct Gaussian<const N: usize> {
    pub mean: SVector<f64, N>,
    pub covariance: SMatrix<f64, N, N>,
}

impl<const N: usize> Gaussian<N> {
    pub fn new(mean: SVector<f64, N>, covariance: SMatrix<f64, N, N>) -> Self {
        Self { mean, covariance }
    }

    /// Gaussian with independent components of the given variances.
    pub fn diagonal(mean: [f64; N], variances: [f64; N]) -> Self {
        Self {
            mean: SVector::from(mean),
            covariance: SMatrix::from_diagonal(&SVector::from(variances)),
        }
    }

    /// Sum of the variances.
    pub fn trace(&self) -> f64 {
        self.covariance.trace()
    }
}

/// Discrete-time linear-Gaussian filter with `N` states and `M` observed components.
///
/// Gating and candidate selection are left to the owner; this type only
/// knows how to propagate the belief and fold in one observation.
#[derive(Debug, Clone)]
pub struct LinearGaussianFilter<const N: usize, const M: usize> {
    transition: SMatrix<f64, N, N>,
    observation: SMatrix<f64, M, N>,
    process_noise: SMatrix<f64, N, N>,
    observation_noise: SMatrix<f64, M, M>,
    state: Gaussian<N>,
}

impl<const N: usize, const M: usize> LinearGaussianFilter<N, M> {
    pub fn new(
        transition: SMatrix<f64, N, N>,
        observation: SMatrix<f64, M, N>,
        process_noise: SMatrix<f64, N, N>,
        observation_noise: SMatrix<f64, M, M>,
        state: Gaussian<N>,
    ) -> Self {
        Self {
            transition,
            observation,
            process_noise,
            observation_noise,
            state,
        }
    }

    pub fn state(&self) -> &Gaussian<N> {
        &self.state
    }

    pub fn observation_matrix(&self) -> &SMatrix<f64, M, N> {
        &self.observation
    }

    /// x = A x, P = A P Aᵀ + Q
    pub fn predict(&mut self) {
        let a = &self.transition;
        self.state.mean = a * self.state.mean;
        self.state.covariance = a * self.state.covariance * a.transpose() + self.process_noise;
    }

    /// S = R + C P Cᵀ
    pub fn innovation_covariance(&self) -> SMatrix<f64, M, M> {
        let c = &self.observation;
        self.observation_noise + c * self.state.covariance * c.transpose()
    }

    pub fn inverse_innovation_covariance(&self) -> Result<SMatrix<f64, M, M>, Error> {
        self.innovation_covariance()
            .try_inverse()
            .ok_or(Error::SingularInnovation)
    }

    /// e = y - C x
    pub fn innovation(&self, observation: &SVector<f64, M>) -> SVector<f64, M> {
        observation - self.observation * self.state.mean
    }

    /// Folds in an innovation already computed against the current belief.
    ///
    /// `inverse_innovation_covariance` must come from the same belief.
    pub fn correct_with(
        &mut self,
        innovation: &SVector<f64, M>,
        inverse_innovation_covariance: &SMatrix<f64, M, M>,
    ) {
        let c = &self.observation;
        let gain = self.state.covariance * c.transpose() * inverse_innovation_covariance;
        let reduction = gain * c * self.state.covariance;
        self.state.mean += gain * innovation;
        self.state.covariance -= reduction;
    }

    pub fn correct(&mut self, observation: &SVector<f64, M>) -> Result<(), Error> {
        let s_inv = self.inverse_innovation_covariance()?;
        let innovation = self.innovation(observation);
        self.correct_with(&innovation, &s_inv);
        Ok(())
    }
}
