// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Encoding negotiation between what an asset offers and what the runtime decodes.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use strata_core::{
    asset::ResourceReference,
    capability::CapabilityProbe,
    encoding::{AudioFormat, EncodingDescriptor},
};

/// The probed support of one encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    /// The encoding.
    pub format: AudioFormat,
    /// Whether the runtime can decode it.
    pub enabled: bool,
}

/// Chooses which candidate encoding of an asset to load.
///
/// # Lifecycle
///
/// Capability detection is deferred until the first query and runs exactly
/// once; the resulting codec table is immutable for the negotiator's lifetime.
/// One negotiator is owned by the [`AssetAgent`](super::AssetAgent), so the
/// probe runs once per agent rather than once per asset.
pub struct FormatNegotiator {
    probe: Arc<dyn CapabilityProbe>,
    codecs: OnceLock<Vec<Codec>>,
}

impl FormatNegotiator {
    /// Creates a negotiator; `probe` is not consulted until first use.
    pub fn new(probe: Arc<dyn CapabilityProbe>) -> Self {
        Self {
            probe,
            codecs: OnceLock::new(),
        }
    }

    /// The probed codec table, in priority order.
    ///
    /// Empty when the runtime has no audio context at all.
    pub fn codecs(&self) -> &[Codec] {
        self.codecs.get_or_init(|| {
            if !self.probe.has_audio_context() {
                log::warn!("No audio context available, every sound encoding is disabled");
                return Vec::new();
            }

            let codecs: Vec<Codec> = AudioFormat::PRIORITY
                .iter()
                .map(|&format| Codec {
                    format,
                    enabled: self.probe.can_decode(format),
                })
                .collect();
            log::info!("Audio codec support: {:?}", codecs);
            codecs
        })
    }

    /// Whether the runtime can decode anything at all.
    pub fn has_audio_context(&self) -> bool {
        !self.codecs().is_empty()
    }

    /// Whether `format` was probed as decodable.
    pub fn is_enabled(&self, format: AudioFormat) -> bool {
        self.codecs()
            .iter()
            .any(|codec| codec.format == format && codec.enabled)
    }

    /// Annotates the requested encodings with their support, in priority order.
    pub fn describe(
        &self,
        requested: &BTreeMap<AudioFormat, ResourceReference>,
    ) -> Vec<EncodingDescriptor> {
        self.codecs()
            .iter()
            .filter_map(|codec| {
                requested.get(&codec.format).map(|reference| EncodingDescriptor {
                    format: codec.format,
                    reference: reference.clone(),
                    enabled: codec.enabled,
                })
            })
            .collect()
    }

    /// Picks the highest-priority encoding that is both requested and enabled.
    ///
    /// `None` means the asset is unsupported on this runtime.
    pub fn select(
        &self,
        requested: &BTreeMap<AudioFormat, ResourceReference>,
    ) -> Option<EncodingDescriptor> {
        self.describe(requested)
            .into_iter()
            .find(|descriptor| descriptor.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strata_core::capability::FixedCapabilities;

    struct CountingProbe {
        inner: FixedCapabilities,
        probes: AtomicUsize,
    }

    impl CapabilityProbe for CountingProbe {
        fn has_audio_context(&self) -> bool {
            self.inner.has_audio_context()
        }

        fn can_decode(&self, format: AudioFormat) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.inner.can_decode(format)
        }
    }

    fn refs(pairs: &[(AudioFormat, &str)]) -> BTreeMap<AudioFormat, ResourceReference> {
        pairs
            .iter()
            .map(|(format, reference)| (*format, ResourceReference::new(*reference)))
            .collect()
    }

    #[test]
    fn test_detection_is_lazy_and_runs_once() {
        let probe = Arc::new(CountingProbe {
            inner: FixedCapabilities::with_formats([AudioFormat::Ogg]),
            probes: AtomicUsize::new(0),
        });
        let negotiator = FormatNegotiator::new(probe.clone());
        assert_eq!(probe.probes.load(Ordering::SeqCst), 0);

        negotiator.codecs();
        negotiator.select(&refs(&[(AudioFormat::Ogg, "a.ogg")]));
        negotiator.is_enabled(AudioFormat::Mp3);

        assert_eq!(probe.probes.load(Ordering::SeqCst), AudioFormat::PRIORITY.len());
    }

    #[test]
    fn test_selects_first_enabled_in_priority_order() {
        let negotiator = FormatNegotiator::new(Arc::new(FixedCapabilities::with_formats([
            AudioFormat::Ogg,
            AudioFormat::Wav,
        ])));
        let requested = refs(&[
            (AudioFormat::Wav, "a.wav"),
            (AudioFormat::Mp3, "a.mp3"),
            (AudioFormat::Ogg, "a.ogg"),
        ]);

        let selected = negotiator.select(&requested).unwrap();
        assert_eq!(selected.format, AudioFormat::Ogg);
        assert_eq!(selected.reference.as_str(), "a.ogg");

        let described: Vec<_> = negotiator
            .describe(&requested)
            .into_iter()
            .map(|d| (d.format, d.enabled))
            .collect();
        assert_eq!(
            described,
            vec![
                (AudioFormat::Mp3, false),
                (AudioFormat::Ogg, true),
                (AudioFormat::Wav, true),
            ]
        );
    }

    #[test]
    fn test_no_match_is_none() {
        let negotiator =
            FormatNegotiator::new(Arc::new(FixedCapabilities::with_formats([AudioFormat::Mp3])));
        assert!(negotiator
            .select(&refs(&[(AudioFormat::Ogg, "a.ogg")]))
            .is_none());
        assert!(negotiator.select(&BTreeMap::new()).is_none());
    }

    #[test]
    fn test_without_audio_context_table_is_empty() {
        let negotiator = FormatNegotiator::new(Arc::new(FixedCapabilities::without_audio()));
        assert!(negotiator.codecs().is_empty());
        assert!(!negotiator.has_audio_context());
        assert!(negotiator
            .select(&refs(&[(AudioFormat::Wav, "a.wav")]))
            .is_none());
    }
}
