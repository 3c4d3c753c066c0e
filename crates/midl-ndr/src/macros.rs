//! Declarative codecs for IDL structures and parameter lists
//!
//! [`ndr_struct!`](crate::ndr_struct) declares a structure whose members follow
//! NDR structure layout: every member's inline part first, then every
//! member's deferred pointees in member order.
//!
//! [`ndr_params!`](crate::ndr_params) declares the `[in]` or `[out]` parameter
//! list of an operation. Parameters are top-level, so each one is written
//! completely (inline part and pointees) before the next.
//!
//! Both accept the same member syntax. A member is `name: Type`, optionally
//! followed by `=> kind(args)` when its encoding depends on other members:
//!
//! | kind | Rust type | IDL |
//! |------|-----------|-----|
//! | `bool32()` | `bool` | `BOOL` |
//! | `range(min, max)` | integer | `[range(min, max)]` |
//! | `size_is(n)` | `Vec<T>` | `[size_is(n)] T*` |
//! | `length_is(l)` | `Vec<T>` | `[size_is(..), length_is(l)] T*` when the size member is not part of this list |
//! | `size_length_is(n, l)` | `Vec<T>` | `[size_is(n), length_is(l)] T*` |
//! | `unique_size_is(n)` | `Option<Vec<T>>` | `[unique, size_is(n)] T*` |
//! | `unique_size_length_is(n, l)` | `Option<Vec<T>>` | `[unique, size_is(n), length_is(l)] T*` |
//!
//! The `ndr_prepare` step generated for each declaration fills a zero size
//! or length member from the length of the slice it describes, when that
//! slice is present.
//!
//! Correlated array kinds write their body in the inline pass, so inside
//! `ndr_struct!` they are only usable behind a unique pointer. Structures with
//! an embedded conformant array implement the codec traits by hand.
//!
//! Declarations must derive `Default`: decoding starts from the default value
//! and assigns members in wire order, so a correlation member decoded earlier
//! is visible to the members after it.

/// Declare a structure with NDR structure layout.
#[macro_export]
macro_rules! ndr_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $kind:ident ( $($arg:tt)* ))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::NdrEncode for $name {
            #[allow(unused_variables)]
            fn ndr_encode<B: $crate::BufMut>(
                &self,
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<()> {
                ctx.write_align(buf, position, <Self as $crate::NdrEncode>::ndr_align());
                $( $crate::__ndr_member!(@encode self, $field, buf, ctx, position; $($kind($($arg)*))?); )*
                Ok(())
            }

            #[allow(unused_variables)]
            fn ndr_encode_deferred<B: $crate::BufMut>(
                &self,
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<()> {
                $( $crate::__ndr_member!(@encode_deferred self, $field, buf, ctx, position; $($kind($($arg)*))?); )*
                Ok(())
            }

            fn ndr_prepare(&mut self) -> $crate::Result<()> {
                $( $crate::__ndr_member!(@prepare self, $field; $($kind($($arg)*))?); )*
                Ok(())
            }

            fn ndr_align() -> usize {
                let align = 1usize;
                $( let align = align.max($crate::__ndr_member!(@align $fty; $($kind($($arg)*))?)); )*
                align
            }
        }

        impl $crate::NdrDecode for $name {
            #[allow(unused_variables)]
            fn ndr_decode<B: $crate::Buf>(
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<Self> {
                ctx.read_align(buf, position, <Self as $crate::NdrDecode>::ndr_align(), 0)?;
                #[allow(unused_mut)]
                let mut out = Self::default();
                $( $crate::__ndr_member!(@decode out, $field, $fty, buf, ctx, position; $($kind($($arg)*))?); )*
                Ok(out)
            }

            #[allow(unused_variables)]
            fn ndr_decode_deferred<B: $crate::Buf>(
                &mut self,
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<()> {
                $( $crate::__ndr_member!(@decode_deferred self, $field, buf, ctx, position; $($kind($($arg)*))?); )*
                Ok(())
            }

            fn ndr_align() -> usize {
                <Self as $crate::NdrEncode>::ndr_align()
            }
        }
    };
}

/// Declare an operation parameter list.
#[macro_export]
macro_rules! ndr_params {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $kind:ident ( $($arg:tt)* ))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::NdrEncode for $name {
            #[allow(unused_variables)]
            fn ndr_encode<B: $crate::BufMut>(
                &self,
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<()> {
                $(
                    $crate::__ndr_member!(@encode self, $field, buf, ctx, position; $($kind($($arg)*))?);
                    $crate::__ndr_member!(@encode_deferred self, $field, buf, ctx, position; $($kind($($arg)*))?);
                )*
                Ok(())
            }

            fn ndr_prepare(&mut self) -> $crate::Result<()> {
                $( $crate::__ndr_member!(@prepare self, $field; $($kind($($arg)*))?); )*
                Ok(())
            }
        }

        impl $crate::NdrDecode for $name {
            #[allow(unused_variables)]
            fn ndr_decode<B: $crate::Buf>(
                buf: &mut B,
                ctx: &$crate::NdrContext,
                position: &mut usize,
            ) -> $crate::Result<Self> {
                #[allow(unused_mut)]
                let mut out = Self::default();
                $(
                    $crate::__ndr_member!(@decode out, $field, $fty, buf, ctx, position; $($kind($($arg)*))?);
                    $crate::__ndr_member!(@decode_deferred out, $field, buf, ctx, position; $($kind($($arg)*))?);
                )*
                Ok(out)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ndr_member {
    // Plain members: the type's own codec

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident;) => {
        $crate::NdrEncode::ndr_encode(&$s.$f, $buf, $ctx, $pos)?
    };
    (@encode_deferred $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident;) => {
        $crate::NdrEncode::ndr_encode_deferred(&$s.$f, $buf, $ctx, $pos)?
    };
    (@prepare $s:ident, $f:ident;) => {
        $crate::NdrEncode::ndr_prepare(&mut $s.$f)?
    };
    (@align $t:ty;) => {
        <$t as $crate::NdrEncode>::ndr_align()
    };
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident;) => {
        $o.$f = <$t as $crate::NdrDecode>::ndr_decode($buf, $ctx, $pos)?
    };
    (@decode_deferred $o:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident;) => {
        $crate::NdrDecode::ndr_decode_deferred(&mut $o.$f, $buf, $ctx, $pos)?
    };

    // BOOL

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; bool32()) => {
        $crate::encode_bool32($s.$f, $buf, $ctx, $pos)?
    };
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; bool32()) => {
        $o.$f = $crate::decode_bool32($buf, $ctx, $pos)?
    };
    (@align $t:ty; bool32()) => {
        4usize
    };

    // [range(min, max)]

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; range($min:expr, $max:expr)) => {{
        $crate::check_range(stringify!($f), u64::from($s.$f), $min, $max)?;
        $crate::NdrEncode::ndr_encode(&$s.$f, $buf, $ctx, $pos)?
    }};
    (@prepare $s:ident, $f:ident; range($min:expr, $max:expr)) => {
        $crate::check_range(stringify!($f), u64::from($s.$f), $min, $max)?
    };
    (@align $t:ty; range($min:expr, $max:expr)) => {
        <$t as $crate::NdrEncode>::ndr_align()
    };
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; range($min:expr, $max:expr)) => {{
        $o.$f = <$t as $crate::NdrDecode>::ndr_decode($buf, $ctx, $pos)?;
        $crate::check_range(stringify!($f), u64::from($o.$f), $min, $max)?
    }};

    // [size_is(n)]

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; size_is($n:ident)) => {
        $crate::encode_conformant(&$s.$f, $s.$n, $buf, $ctx, $pos)?
    };
    (@prepare $s:ident, $f:ident; size_is($n:ident)) => {{
        if $s.$n == 0 {
            $s.$n = $crate::__ndr_member!(@len $s.$f);
        }
        $crate::NdrEncode::ndr_prepare(&mut $s.$f)?
    }};
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; size_is($n:ident)) => {
        $o.$f = $crate::decode_conformant(stringify!($f), $o.$n, $buf, $ctx, $pos)?
    };

    // [size_is(..), length_is(l)] with the size member outside this list

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; length_is($l:ident)) => {
        $crate::encode_conformant_varying(&$s.$f, $crate::__ndr_member!(@len $s.$f), $s.$l, $buf, $ctx, $pos)?
    };
    (@prepare $s:ident, $f:ident; length_is($l:ident)) => {{
        if $s.$l == 0 {
            $s.$l = $crate::__ndr_member!(@len $s.$f);
        }
        $crate::NdrEncode::ndr_prepare(&mut $s.$f)?
    }};
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; length_is($l:ident)) => {
        $o.$f = $crate::decode_conformant_varying(stringify!($f), 0, $buf, $ctx, $pos)?
    };

    // [size_is(n), length_is(l)]

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; size_length_is($n:ident, $l:ident)) => {
        $crate::encode_conformant_varying(&$s.$f, $s.$n, $s.$l, $buf, $ctx, $pos)?
    };
    (@prepare $s:ident, $f:ident; size_length_is($n:ident, $l:ident)) => {{
        if $s.$n == 0 {
            $s.$n = $crate::__ndr_member!(@len $s.$f);
        }
        if $s.$l == 0 {
            $s.$l = $crate::__ndr_member!(@len $s.$f);
        }
        $crate::NdrEncode::ndr_prepare(&mut $s.$f)?
    }};
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; size_length_is($n:ident, $l:ident)) => {
        $o.$f = $crate::decode_conformant_varying(stringify!($f), $o.$n, $buf, $ctx, $pos)?
    };

    // [unique, size_is(n)]

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_is($n:ident)) => {
        $crate::encode_referent($s.$f.is_some(), $buf, $ctx, $pos)?
    };
    (@encode_deferred $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_is($n:ident)) => {
        if let Some(elements) = &$s.$f {
            $crate::encode_conformant(elements, $s.$n, $buf, $ctx, $pos)?;
        }
    };
    (@prepare $s:ident, $f:ident; unique_size_is($n:ident)) => {
        if let Some(elements) = &mut $s.$f {
            if $s.$n == 0 {
                $s.$n = $crate::__ndr_member!(@len elements);
            }
            $crate::NdrEncode::ndr_prepare(elements)?;
        }
    };
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; unique_size_is($n:ident)) => {
        $o.$f = $crate::decode_referent($buf, $ctx, $pos)?.then(Vec::new)
    };
    (@decode_deferred $o:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_is($n:ident)) => {
        if $o.$f.is_some() {
            $o.$f = Some($crate::decode_conformant(stringify!($f), $o.$n, $buf, $ctx, $pos)?);
        }
    };

    // [unique, size_is(n), length_is(l)]

    (@encode $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_length_is($n:ident, $l:ident)) => {
        $crate::encode_referent($s.$f.is_some(), $buf, $ctx, $pos)?
    };
    (@encode_deferred $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_length_is($n:ident, $l:ident)) => {
        if let Some(elements) = &$s.$f {
            $crate::encode_conformant_varying(elements, $s.$n, $s.$l, $buf, $ctx, $pos)?;
        }
    };
    (@prepare $s:ident, $f:ident; unique_size_length_is($n:ident, $l:ident)) => {
        if let Some(elements) = &mut $s.$f {
            if $s.$n == 0 {
                $s.$n = $crate::__ndr_member!(@len elements);
            }
            if $s.$l == 0 {
                $s.$l = $crate::__ndr_member!(@len elements);
            }
            $crate::NdrEncode::ndr_prepare(elements)?;
        }
    };
    (@decode $o:ident, $f:ident, $t:ty, $buf:ident, $ctx:ident, $pos:ident; unique_size_length_is($n:ident, $l:ident)) => {
        $o.$f = $crate::decode_referent($buf, $ctx, $pos)?.then(Vec::new)
    };
    (@decode_deferred $o:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; unique_size_length_is($n:ident, $l:ident)) => {
        if $o.$f.is_some() {
            $o.$f = Some($crate::decode_conformant_varying(stringify!($f), $o.$n, $buf, $ctx, $pos)?);
        }
    };

    // Kinds without a deferred part or a prepare step

    (@encode_deferred $s:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; $kind:ident($($arg:tt)*)) => {};
    (@decode_deferred $o:ident, $f:ident, $buf:ident, $ctx:ident, $pos:ident; $kind:ident($($arg:tt)*)) => {};
    (@prepare $s:ident, $f:ident; $kind:ident($($arg:tt)*)) => {};
    (@align $t:ty; $kind:ident($($arg:tt)*)) => {
        4usize
    };

    (@len $e:expr) => {
        u32::try_from($e.len()).map_err(|_| $crate::NdrError::IntegerOverflow)?
    };
}

#[cfg(test)]
mod tests {
    use crate::{decode_complete, encode_complete, NdrContext, NdrDecode, NdrEncode, NdrError};
    use bytes::BytesMut;

    crate::ndr_struct! {
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct Descriptor {
            pub data: Option<Vec<u8>> => unique_size_length_is(size, length),
            pub size: u32,
            pub length: u32,
        }
    }

    crate::ndr_struct! {
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct Pair {
            pub first: Option<String>,
            pub flag: bool => bool32(),
            pub second: Option<String>,
        }
    }

    crate::ndr_params! {
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct Params {
            pub name: Option<String>,
            pub data: Vec<u8> => size_is(data_length),
            pub data_length: u32,
            pub count: u32 => range(0, 10),
        }
    }

    fn encode<T: NdrEncode>(value: &T) -> BytesMut {
        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        encode_complete(value, &mut buf, &ctx, &mut pos).unwrap();
        buf
    }

    fn decode<T: NdrDecode>(bytes: &[u8]) -> crate::Result<T> {
        let ctx = NdrContext::new();
        let mut reader = bytes;
        let mut pos = 0;
        decode_complete(&mut reader, &ctx, &mut pos)
    }

    #[test]
    fn test_struct_defers_after_all_inline_members() {
        let pair = Pair {
            first: Some("a".into()),
            flag: true,
            second: Some("b".into()),
        };
        let buf = encode(&pair);

        // referent, BOOL, referent, then both strings in member order
        assert_eq!(&buf[0..12], &[0, 0, 2, 0, 1, 0, 0, 0, 4, 0, 2, 0]);
        assert_eq!(&buf[12..28], &[2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, b'a', 0, 0, 0]);
        assert_eq!(&buf[28..44], &[2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, b'b', 0, 0, 0]);

        assert_eq!(decode::<Pair>(&buf).unwrap(), pair);
    }

    #[test]
    fn test_prepare_fills_size_and_length() {
        let mut descriptor = Descriptor {
            data: Some(vec![9, 8, 7]),
            ..Default::default()
        };
        descriptor.ndr_prepare().unwrap();
        assert_eq!((descriptor.size, descriptor.length), (3, 3));

        // An explicit size is kept
        let mut descriptor = Descriptor {
            data: Some(vec![9, 8, 7]),
            size: 16,
            length: 0,
        };
        descriptor.ndr_prepare().unwrap();
        assert_eq!((descriptor.size, descriptor.length), (16, 3));

        let buf = encode(&descriptor);
        assert_eq!(
            &buf[..],
            &[
                0, 0, 2, 0, // referent
                16, 0, 0, 0, 3, 0, 0, 0, // size, length
                16, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, // max, offset, actual
                9, 8, 7,
            ]
        );
        assert_eq!(decode::<Descriptor>(&buf).unwrap(), descriptor);
    }

    #[test]
    fn test_absent_buffer_keeps_zero_size() {
        let mut descriptor = Descriptor::default();
        descriptor.ndr_prepare().unwrap();
        assert_eq!(descriptor.size, 0);
        assert_eq!(&encode(&descriptor)[..], &[0; 12]);
    }

    #[test]
    fn test_params_write_each_parameter_completely() {
        let mut params = Params {
            name: Some("x".into()),
            data: vec![1, 2],
            data_length: 0,
            count: 3,
        };
        params.ndr_prepare().unwrap();
        let buf = encode(&params);

        assert_eq!(
            &buf[..],
            &[
                0, 0, 2, 0, // referent of name
                2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, b'x', 0, 0, 0, // name body right away
                2, 0, 0, 0, 1, 2, // data
                0, 0, // alignment
                2, 0, 0, 0, // data_length
                3, 0, 0, 0, // count
            ]
        );
        assert_eq!(decode::<Params>(&buf).unwrap(), params);
    }

    #[test]
    fn test_range_enforced_both_ways() {
        let mut params = Params {
            count: 11,
            ..Default::default()
        };
        assert!(matches!(params.ndr_prepare(), Err(NdrError::OutOfRange { field: "count", .. })));

        let ctx = NdrContext::new();
        let mut buf = BytesMut::new();
        let mut pos = 0;
        assert!(params.ndr_encode(&mut buf, &ctx, &mut pos).is_err());

        // null name, empty data, data_length 0, count 11
        let wire = [0u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11, 0, 0, 0];
        assert!(matches!(decode::<Params>(&wire), Err(NdrError::OutOfRange { value: 11, .. })));
    }
}
