use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::algebra::AdditiveGroup;
use crate::cache::compiler;
use crate::compiler::structure_size;
use crate::error::DsError;
use crate::structure::DerivativeStructure;

impl<T: AdditiveGroup + Serialize> Serialize for DerivativeStructure<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DerivativeStructure", 3)?;
        s.serialize_field("free_parameters", &self.free_parameters())?;
        s.serialize_field("order", &self.order())?;
        s.serialize_field("data", self.data())?;
        s.end()
    }
}

impl<'de, T: AdditiveGroup + Deserialize<'de>> Deserialize<'de> for DerivativeStructure<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct StructureData<T> {
            free_parameters: usize,
            order: usize,
            data: Vec<T>,
        }

        let raw = StructureData::<T>::deserialize(deserializer)?;
        // the layout is re-derived, so only the length needs checking; it is
        // checked before the cache builds anything for untrusted dimensions
        let expected = structure_size(raw.free_parameters, raw.order).unwrap_or(usize::MAX);
        if raw.data.len() != expected {
            return Err(D::Error::custom(DsError::DimensionMismatch {
                expected,
                actual: raw.data.len(),
            }));
        }
        DerivativeStructure::with_compiler(compiler(raw.free_parameters, raw.order), raw.data)
            .map_err(D::Error::custom)
    }
}
