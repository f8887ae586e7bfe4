use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;

use crate::model::MonteCarloModel;

/// Length of the contiguous temperature chunk owned by each worker.
///
/// Rounds up so that every temperature is covered; the last chunk may be
/// shorter.
pub fn chunk_len(n_temps: usize, n_workers: usize) -> usize {
    n_temps.div_ceil(n_workers.max(1)).max(1)
}

/// Run `body` once per temperature, distributing contiguous chunks of the
/// grid over workers.
///
/// Worker `w` gets its own clone of `model` and its own stream seeded with
/// `base_seed + w`. Before each temperature the worker calls `set_spin`, then
/// `body(model, beta, rng)`. Results land at the index of their temperature,
/// so the output does not depend on scheduling.
///
/// When `sequential` is true the chunks run one after another on the current
/// thread; otherwise they run on the ambient rayon pool.
pub fn par_over_temperatures<M, T>(
    temperatures: &[f64],
    model: &M,
    n_workers: usize,
    base_seed: u64,
    sequential: bool,
    body: impl Fn(&mut M, f64, &mut Xoshiro256StarStar) -> T + Send + Sync,
) -> Vec<T>
where
    M: MonteCarloModel,
    T: Send + Default + Clone,
{
    let chunk = chunk_len(temperatures.len(), n_workers);
    let mut out = vec![T::default(); temperatures.len()];

    let work = |(worker, (out, temps)): (usize, (&mut [T], &[f64]))| {
        tracing::debug!(worker, n_temps = temps.len(), "worker chunk started");
        let mut local = model.clone();
        let mut rng = Xoshiro256StarStar::seed_from_u64(base_seed.wrapping_add(worker as u64));
        for (slot, &t) in out.iter_mut().zip(temps) {
            local.set_spin(&mut rng);
            *slot = body(&mut local, 1.0 / t, &mut rng);
        }
    };

    if sequential {
        out.chunks_mut(chunk)
            .zip(temperatures.chunks(chunk))
            .enumerate()
            .for_each(work);
    } else {
        out.par_chunks_mut(chunk)
            .zip(temperatures.par_chunks(chunk))
            .enumerate()
            .for_each(work);
    }
    out
}
