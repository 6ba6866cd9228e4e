use crate::{core::Callbacks, traits::Status};

/// A trait representing a minimization algorithm.
///
/// This trait is implemented for the algorithms found in the [`algorithms`](crate::algorithms)
/// module, and contains all the methods needed to be run by [`Algorithm::process`].
pub trait Algorithm<P, S: Status, E> {
    /// A type which holds a summary of the algorithm's ending state.
    type Summary;
    /// The configuration struct for the algorithm.
    type Config;

    /// Any setup work done before the main steps of the algorithm should be done here.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if the setup or any evaluation fails.
    fn initialize(&mut self, config: Self::Config, problem: &P, status: &mut S) -> Result<(), E>;
    /// The main "step" of an algorithm, which is repeated until termination conditions are met.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation fails.
    fn step(&mut self, current_step: usize, problem: &P, status: &mut S) -> Result<(), E>;
    /// Runs any termination/convergence checks and returns true if the algorithm should stop.
    /// Algorithms may also change their state here (restarts, for example).
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation performed during the check fails.
    fn check_for_termination(
        &mut self,
        current_step: usize,
        problem: &P,
        status: &mut S,
    ) -> Result<bool, E>;
    /// Called when an [`AbortSignal`](crate::traits::AbortSignal) stops the run between steps.
    fn abort(&mut self, status: &mut S) {
        status.update_message("Abort signal received");
    }
    /// Runs any steps needed by the [`Algorithm`] after termination or convergence. This will run
    /// regardless of whether the [`Algorithm`] converged.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any evaluation fails.
    #[allow(unused_variables)]
    fn postprocessing(&mut self, problem: &P, status: &mut S) -> Result<(), E> {
        Ok(())
    }
    /// Generates a new [`Algorithm::Summary`] from the current state of the [`Algorithm`], which
    /// can be displayed or used elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any internal evaluation fails while creating the summary.
    fn summarize(&self, current_step: usize, problem: &P, status: &S) -> Result<Self::Summary, E>;

    /// Run the algorithm to completion.
    ///
    /// This method first runs [`Algorithm::initialize`], then runs [`Algorithm::step`] in a loop.
    /// After every step, all observers in `callbacks` are shown the status, then
    /// [`Algorithm::check_for_termination`] is consulted and finally the abort signal is checked.
    /// At least one step is always taken. Regardless of how the loop ends,
    /// [`Algorithm::postprocessing`] is called before [`Algorithm::summarize`] builds the result.
    ///
    /// # Errors
    ///
    /// Returns an `Err(E)` if any of the above methods fail.
    fn process(
        &mut self,
        problem: &P,
        config: Self::Config,
        mut callbacks: Callbacks<S>,
    ) -> Result<Self::Summary, E>
    where
        Self: Sized,
    {
        callbacks.reset();
        let mut status = S::default();
        self.initialize(config, problem, &mut status)?;
        let mut current_step = 0;
        loop {
            self.step(current_step, problem, &mut status)?;
            callbacks.observe(current_step, &status);
            if self.check_for_termination(current_step, problem, &mut status)? {
                break;
            }
            if callbacks.is_aborted() {
                self.abort(&mut status);
                break;
            }
            current_step += 1;
        }
        self.postprocessing(problem, &mut status)?;
        self.summarize(current_step, problem, &status)
    }
}
