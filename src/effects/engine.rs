use tracing::{debug, trace};

use crate::{
    config::EffectsConfig,
    effects::{EffectContext, EffectSpec},
    error::Result,
    video::PixelBuffer,
};

/// Applies effect specs to frames, one buffer at a time
///
/// The engine owns the noise source used by film grain. Engines are cheap;
/// use one per thread when processing frames in parallel.
pub struct FrameEffectEngine {
    context: EffectContext,
}

impl FrameEffectEngine {
    /// Create an engine with an entropy-seeded noise source
    pub fn new() -> Self {
        Self {
            context: EffectContext::new(),
        }
    }

    /// Create an engine whose grain is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            context: EffectContext::with_seed(seed),
        }
    }

    /// Create an engine from the `[effects]` configuration section
    pub fn from_config(config: &EffectsConfig) -> Self {
        match config.grain_seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Apply a single effect in place and hand the same buffer back
    pub fn apply_effect<'a>(
        &mut self,
        buffer: &'a mut PixelBuffer,
        spec: &EffectSpec,
    ) -> Result<&'a mut PixelBuffer> {
        let effect = spec.to_effect();
        effect.validate()?;

        trace!("Applying {} to {}x{} frame", spec, buffer.width(), buffer.height());
        effect.apply(buffer, &mut self.context);
        Ok(buffer)
    }

    /// Fold a chain of effects left to right
    ///
    /// The whole chain is validated first; on error the buffer is untouched.
    pub fn apply_chain<'a>(
        &mut self,
        buffer: &'a mut PixelBuffer,
        chain: &[EffectSpec],
    ) -> Result<&'a mut PixelBuffer> {
        for spec in chain {
            spec.validate()?;
        }

        debug!("Applying chain of {} effects", chain.len());
        for spec in chain {
            let effect = spec.to_effect();
            effect.apply(buffer, &mut self.context);
        }
        Ok(buffer)
    }
}

impl Default for FrameEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}
