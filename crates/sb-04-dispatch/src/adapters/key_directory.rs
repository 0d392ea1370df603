//! Key directory backed by the bridge's signature scheme.

use sb_01_signature_verification::SignatureScheme;
use sb_03_operator_registry::KeyDirectory;
use shared_types::Address;

/// Lets the registry ask the signature scheme whether a key is on file.
pub struct SchemeKeys<'a, S: ?Sized>(pub &'a S);

impl<S: SignatureScheme + ?Sized> KeyDirectory for SchemeKeys<'_, S> {
    fn has_key(&self, operator: &Address) -> bool {
        self.0.has_key(operator)
    }
}
