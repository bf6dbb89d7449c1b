use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use serde_json::Value;

pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(value) => *value,
            Value::Number(number) => number.as_f64().map_or(true, |value| value != 0.0),
            Value::String(value) => !value.is_empty(),
            Value::Array(values) => !values.is_empty(),
            Value::Object(map) => !map.is_empty(),
        }
    }
}

/// Judges a response straight from its `Serialize` impl, so values JSON
/// cannot carry (NaN, infinities, non-string map keys) are still judged.
pub fn is_truthy<T>(response: &T) -> Result<bool, serde_json::Error>
where
    T: Serialize + ?Sized,
{
    response.serialize(TruthinessSerializer)
}

struct TruthinessSerializer;

struct Entries {
    entries: usize,
}

impl Entries {
    fn new() -> Entries {
        Entries { entries: 0 }
    }

    fn count(&mut self) -> Result<(), serde_json::Error> {
        self.entries += 1;
        Ok(())
    }

    fn finish(self) -> Result<bool, serde_json::Error> {
        Ok(self.entries > 0)
    }
}

// Enum variants with data always carry their tag.
struct Variant;

impl Serializer for TruthinessSerializer {
    type Ok = bool;
    type Error = serde_json::Error;
    type SerializeSeq = Entries;
    type SerializeTuple = Entries;
    type SerializeTupleStruct = Entries;
    type SerializeTupleVariant = Variant;
    type SerializeMap = Entries;
    type SerializeStruct = Entries;
    type SerializeStructVariant = Variant;

    fn serialize_bool(self, v: bool) -> Result<bool, serde_json::Error> {
        Ok(v)
    }

    fn serialize_i8(self, v: i8) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_i16(self, v: i16) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_i32(self, v: i32) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_i64(self, v: i64) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_i128(self, v: i128) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_u8(self, v: u8) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_u16(self, v: u16) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_u32(self, v: u32) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_u64(self, v: u64) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    fn serialize_u128(self, v: u128) -> Result<bool, serde_json::Error> {
        Ok(v != 0)
    }

    // NaN compares unequal to zero, so it counts as non-zero.
    fn serialize_f32(self, v: f32) -> Result<bool, serde_json::Error> {
        Ok(v != 0.0)
    }

    fn serialize_f64(self, v: f64) -> Result<bool, serde_json::Error> {
        Ok(v != 0.0)
    }

    fn serialize_char(self, _v: char) -> Result<bool, serde_json::Error> {
        Ok(true)
    }

    fn serialize_str(self, v: &str) -> Result<bool, serde_json::Error> {
        Ok(!v.is_empty())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<bool, serde_json::Error> {
        Ok(!v.is_empty())
    }

    fn serialize_none(self) -> Result<bool, serde_json::Error> {
        Ok(false)
    }

    fn serialize_some<T>(self, value: &T) -> Result<bool, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<bool, serde_json::Error> {
        Ok(false)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool, serde_json::Error> {
        Ok(false)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<bool, serde_json::Error> {
        Ok(!variant.is_empty())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<bool, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(true)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Entries, serde_json::Error> {
        Ok(Entries::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Entries, serde_json::Error> {
        Ok(Entries::new())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Entries, serde_json::Error> {
        Ok(Entries::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Variant, serde_json::Error> {
        Ok(Variant)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Entries, serde_json::Error> {
        Ok(Entries::new())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Entries, serde_json::Error> {
        Ok(Entries::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Variant, serde_json::Error> {
        Ok(Variant)
    }
}

impl SerializeSeq for Entries {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.count()
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        self.finish()
    }
}

impl SerializeTuple for Entries {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.count()
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        self.finish()
    }
}

impl SerializeTupleStruct for Entries {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.count()
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        self.finish()
    }
}

impl SerializeMap for Entries {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_key<T>(&mut self, _key: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.count()
    }

    fn serialize_value<T>(&mut self, _value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        self.finish()
    }
}

impl SerializeStruct for Entries {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_field<T>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        self.count()
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        self.finish()
    }
}

impl SerializeTupleVariant for Variant {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        Ok(true)
    }
}

impl SerializeStructVariant for Variant {
    type Ok = bool;
    type Error = serde_json::Error;

    fn serialize_field<T>(
        &mut self,
        _key: &'static str,
        _value: &T,
    ) -> Result<(), serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, serde_json::Error> {
        Ok(true)
    }
}
