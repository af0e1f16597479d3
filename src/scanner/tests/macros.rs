/// Macro for asserting token streams
/// Used as: tokens!(Scan => <sigil> <expected> [=>
/// <message>] [, ..]) Where:
///     <sigil>     '|' for a Token, or '@' for an
///                 Option<Token>
///     <expected>  Either Token or Option<Token>
///     <message>   A message to print on failure
macro_rules! tokens {
    ($scan:expr => $($id:tt $expected:expr $(=> $msg:tt)?),+ ) => {
        let mut iter = $scan.kinds();

        let mut f = || -> std::result::Result<(), ::anyhow::Error> {

            $( tokens!(@unwrap $id iter => $expected $(=> $msg)? ); )+

            Ok(())
        };

        if let Err(e) = f() {
            panic!("tokens! error: {}", e)
        }
    };

    // <-- PRIVATE VARIANTS -->

    // Variant for token assert, with/without a message
    (@unwrap | $iter:expr => $expected:expr $(=> $msg:tt)? ) => {
        let token = match $iter.next()
        {
            Some(token) => token,
            None => anyhow::bail!("Unexpected end of tokens, was expecting: {:?}", $expected),
        };

        assert_eq!(token, $expected $(, $msg)? )
    };
    // Variant for option assert
    (@unwrap @ $iter:expr => $expected:expr $(=> $msg:tt)? ) => {
        assert_eq!($iter.next(), $expected $(, $msg)? )
    };
}
