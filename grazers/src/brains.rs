use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::{Normal, StandardNormal};

// dx, dy to the nearest plant and own health
pub const N_INPUTS: usize = 3;
pub const N_HIDDEN: usize = 5;
// wander, forage, rest
pub const N_OUTPUTS: usize = 3;

/// stored as an array for easy
/// neural network access.
/// but accessed/modified through methods
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Inputs {
    data: [f64; N_INPUTS],
}

impl Inputs {
    pub fn dx_mut(&mut self) -> &mut f64 {
        &mut self.data[0]
    }
    pub fn dy_mut(&mut self) -> &mut f64 {
        &mut self.data[1]
    }
    pub fn health_mut(&mut self) -> &mut f64 {
        &mut self.data[2]
    }
    pub fn data(&self) -> &[f64; N_INPUTS] {
        &self.data
    }
}

/// what a herbivore decided to do this tick
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// hop to a random spot close by
    Wander,
    /// step towards the nearest plant
    Forage,
    /// keep gliding, choose nothing new
    Rest,
}

const ACTIONS: [Action; N_OUTPUTS] = [Action::Wander, Action::Forage, Action::Rest];

/// action weights, one per [`Action`].
/// Brains are expected to return probabilities but the sampler does not rely on it.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Outputs {
    data: [f64; N_OUTPUTS],
}

impl Outputs {
    pub fn from_weights(data: [f64; N_OUTPUTS]) -> Self {
        Self { data }
    }
    pub fn wander(&self) -> f64 {
        self.data[0]
    }
    pub fn forage(&self) -> f64 {
        self.data[1]
    }
    pub fn rest(&self) -> f64 {
        self.data[2]
    }

    /// samples one action with the outputs as (not necessarily normalized) weights.
    /// zero weights are never picked.
    /// if there is nothing to sample from (all zero, negative, nan) the herbivore rests.
    pub fn choose<R: Rng>(&self, mut rng: R) -> Action {
        match WeightedIndex::<f64>::new(self.data) {
            Ok(dist) => ACTIONS[dist.sample(&mut rng)],
            Err(e) => {
                tracing::warn!("unusable action weights {:?}: {}", self.data, e);
                Action::Rest
            }
        }
    }
}

pub trait Brain: Clone {
    fn init<R: Rng>(rng: R) -> Self;
    fn think(&self, inputs: &Inputs) -> Outputs;
    /// adds noise to every weight
    fn mutate<R: Rng>(&mut self, rng: R, noise: &Normal<f64>);
}

/// the default brain: tanh hidden layer, softmax over the three actions.
/// it is never trained, only mutated.
#[derive(Clone, PartialEq, Debug)]
pub struct Network {
    // each hidden node gets a weight for each input
    input: [[f64; N_HIDDEN]; N_INPUTS],
    // never read by forward(), but drifts with every mutation like the others
    hidden: [[f64; N_HIDDEN]; N_HIDDEN],
    output: [[f64; N_OUTPUTS]; N_HIDDEN],
}

impl Network {
    pub fn from_weights(
        input: [[f64; N_HIDDEN]; N_INPUTS],
        hidden: [[f64; N_HIDDEN]; N_HIDDEN],
        output: [[f64; N_OUTPUTS]; N_HIDDEN],
    ) -> Self {
        Self {
            input,
            hidden,
            output,
        }
    }

    /// returns the probabilities for [wander, forage, rest]
    pub fn forward(&self, features: &[f64; N_INPUTS]) -> [f64; N_OUTPUTS] {
        let mut hidden = [0.0_f64; N_HIDDEN];
        for (x, weights) in features.iter().zip(&self.input) {
            for (h, w) in hidden.iter_mut().zip(weights) {
                *h += x * w;
            }
        }
        for h in hidden.iter_mut() {
            // tanh is flat out there anyway, this also swallows inf - inf
            let clamped = h.max(-20.).min(20.);
            *h = clamped.tanh();
        }

        let mut logits = [0.0_f64; N_OUTPUTS];
        for (h, weights) in hidden.iter().zip(&self.output) {
            for (l, w) in logits.iter_mut().zip(weights) {
                *l += h * w;
            }
        }
        softmax(logits)
    }

    fn weights_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.input
            .iter_mut()
            .flatten()
            .chain(self.hidden.iter_mut().flatten())
            .chain(self.output.iter_mut().flatten())
    }
}

impl Brain for Network {
    fn init<R: Rng>(mut rng: R) -> Self {
        let mut s = Self::from_weights(
            [[0.; N_HIDDEN]; N_INPUTS],
            [[0.; N_HIDDEN]; N_HIDDEN],
            [[0.; N_OUTPUTS]; N_HIDDEN],
        );
        for w in s.weights_mut() {
            *w = rng.sample(StandardNormal);
        }
        s
    }
    fn think(&self, inputs: &Inputs) -> Outputs {
        Outputs::from_weights(self.forward(inputs.data()))
    }
    fn mutate<R: Rng>(&mut self, mut rng: R, noise: &Normal<f64>) {
        for w in self.weights_mut() {
            *w += noise.sample(&mut rng);
        }
    }
}

/// max is subtracted first so big logits don't overflow exp()
pub fn softmax<const N: usize>(mut logits: [f64; N]) -> [f64; N] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.;
    for l in logits.iter_mut() {
        *l = (*l - max).exp();
        sum += *l;
    }
    for l in logits.iter_mut() {
        *l /= sum;
    }
    logits
}
