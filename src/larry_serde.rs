// Copyright 2026 larry developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use ndarray::ArrayD;

use crate::{Label, Larry};

/// Version number of the serialized layout of a [`Larry`].
pub const LARRY_FORMAT_VERSION: u8 = 1u8;

/// Verifies that the version of the deserialized array matches the current
/// `LARRY_FORMAT_VERSION`.
fn verify_version<E>(v: u8) -> Result<(), E>
where E: de::Error
{
    if v != LARRY_FORMAT_VERSION {
        let err_msg = format!("unknown larry version: {}", v);
        return Err(de::Error::custom(err_msg));
    }
    Ok(())
}

/// **Requires crate feature `"serde"`**
impl<A> Serialize for Larry<A>
where A: Serialize
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where Se: Serializer
    {
        let labels: Vec<&Vec<Label>> = self.labels.iter().map(|l| &**l).collect();
        let mut state = serializer.serialize_struct("Larry", 3)?;
        state.serialize_field("v", &LARRY_FORMAT_VERSION)?;
        state.serialize_field("labels", &labels)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

struct LarryVisitor<A>
{
    _marker: PhantomData<A>,
}

enum LarryField
{
    Version,
    Labels,
    Data,
}

static LARRY_FIELDS: &[&str] = &["v", "labels", "data"];

impl<'de> Deserialize<'de> for LarryField
{
    fn deserialize<D>(deserializer: D) -> Result<LarryField, D::Error>
    where D: Deserializer<'de>
    {
        struct LarryFieldVisitor;

        impl<'de> Visitor<'de> for LarryFieldVisitor
        {
            type Value = LarryField;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                formatter.write_str(r#""v", "labels", or "data""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<LarryField, E>
            where E: de::Error
            {
                match value {
                    "v" => Ok(LarryField::Version),
                    "labels" => Ok(LarryField::Labels),
                    "data" => Ok(LarryField::Data),
                    other => Err(de::Error::unknown_field(other, LARRY_FIELDS)),
                }
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<LarryField, E>
            where E: de::Error
            {
                match value {
                    b"v" => Ok(LarryField::Version),
                    b"labels" => Ok(LarryField::Labels),
                    b"data" => Ok(LarryField::Data),
                    other => Err(de::Error::unknown_field(&format!("{:?}", other), LARRY_FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(LarryFieldVisitor)
    }
}

/// Rebuild the array, checking the label invariants again.
fn assemble<A, E>(labels: Vec<Vec<Label>>, data: ArrayD<A>) -> Result<Larry<A>, E>
where E: de::Error
{
    Larry::from_parts(data, labels.into_iter().map(Arc::new).collect()).map_err(de::Error::custom)
}

impl<'de, A> Visitor<'de> for LarryVisitor<A>
where A: Deserialize<'de>
{
    type Value = Larry<A>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        formatter.write_str("larry representation")
    }

    fn visit_seq<V>(self, mut visitor: V) -> Result<Larry<A>, V::Error>
    where V: SeqAccess<'de>
    {
        let v: u8 = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(0, &self)),
        };
        verify_version(v)?;

        let labels: Vec<Vec<Label>> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(1, &self)),
        };

        let data: ArrayD<A> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(2, &self)),
        };

        assemble(labels, data)
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<Larry<A>, V::Error>
    where V: MapAccess<'de>
    {
        let mut v: Option<u8> = None;
        let mut labels: Option<Vec<Vec<Label>>> = None;
        let mut data: Option<ArrayD<A>> = None;

        while let Some(key) = visitor.next_key()? {
            match key {
                LarryField::Version => {
                    let val = visitor.next_value()?;
                    verify_version(val)?;
                    v = Some(val);
                }
                LarryField::Labels => {
                    labels = Some(visitor.next_value()?);
                }
                LarryField::Data => {
                    data = Some(visitor.next_value()?);
                }
            }
        }

        if v.is_none() {
            return Err(de::Error::missing_field("v"));
        }
        let labels = labels.ok_or_else(|| de::Error::missing_field("labels"))?;
        let data = data.ok_or_else(|| de::Error::missing_field("data"))?;
        assemble(labels, data)
    }
}

/// **Requires crate feature `"serde"`**
impl<'de, A> Deserialize<'de> for Larry<A>
where A: Deserialize<'de>
{
    fn deserialize<D>(deserializer: D) -> Result<Larry<A>, D::Error>
    where D: Deserializer<'de>
    {
        deserializer.deserialize_struct("Larry", LARRY_FIELDS, LarryVisitor { _marker: PhantomData })
    }
}
