// dispatch.rs

//! Request handling: a feature selector plus raw string parameters become
//! exactly one typed engine call, and the computation is logged to the
//! session.
//!
//! String-to-number coercion happens here and nowhere else. A parameter that
//! is missing or does not parse is a fault: it is reported and nothing is
//! logged. An undefined result (division by zero and friends) is not a fault;
//! it is logged with a `null` result.
//!
//! A parameter whose value is `ans` takes the session's last numeric result.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{CalcError, Result};
use crate::session::Session;
use crate::{arith, convert, sequence, stats};

/// Longest sequence a single request may generate.
pub const MAX_SEQUENCE_TERMS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Basic,
    Scientific,
    Converter,
    Base,
    Sequence,
    Stats,
    GcdLcm,
    Prime,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Basic,
        Feature::Scientific,
        Feature::Converter,
        Feature::Base,
        Feature::Sequence,
        Feature::Stats,
        Feature::GcdLcm,
        Feature::Prime,
    ];

    /// Selector typed by the user.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Basic => "basic",
            Feature::Scientific => "scientific",
            Feature::Converter => "converter",
            Feature::Base => "base",
            Feature::Sequence => "sequence",
            Feature::Stats => "stats",
            Feature::GcdLcm => "gcdlcm",
            Feature::Prime => "prime",
        }
    }

    /// Label written to the history log.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Basic => "Basic",
            Feature::Scientific => "Scientific",
            Feature::Converter => "Converter",
            Feature::Base => "Base Convert",
            Feature::Sequence => "Sequence",
            Feature::Stats => "Stats",
            Feature::GcdLcm => "GCD/LCM",
            Feature::Prime => "Prime Check",
        }
    }

    pub fn params(self) -> &'static [&'static str] {
        match self {
            Feature::Basic => &["a", "b", "op"],
            Feature::Scientific => &["sop", "val"],
            Feature::Converter => &["ctype", "v"],
            Feature::Base => &["number", "from", "to"],
            Feature::Sequence => &["stype", "n", "start", "diff", "ratio"],
            Feature::Stats => &["values"],
            Feature::GcdLcm => &["i1", "i2"],
            Feature::Prime => &["p"],
        }
    }

    /// The parameter selecting an operation within the feature, with its
    /// accepted values.
    pub fn operations(self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Feature::Basic => Some(("op", &["add", "sub", "mul", "div", "mod", "pow"])),
            Feature::Scientific => Some(("sop", &["sqrt", "factorial"])),
            Feature::Converter => Some(("ctype", &["c2f", "f2c", "m2f", "f2m", "k2l", "l2k"])),
            Feature::Sequence => Some(("stype", &["fib", "arith", "geom"])),
            _ => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Feature::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CalcError::UnknownFeature(s.to_string()))
    }
}

/// One inbound request: which feature to run and its raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub feature: Feature,
    pub params: BTreeMap<String, String>,
}

impl Request {
    pub fn new(feature: Feature) -> Self {
        Self {
            feature,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Builds a request from `feature key=value ...` words.
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let Some((first, rest)) = words.split_first() else {
            return Err(CalcError::UnknownFeature(String::new()));
        };
        let mut request = Request::new(first.as_ref().parse()?);
        for word in rest {
            let (key, value) = crate::parser::split_param(word.as_ref())?;
            request.params.insert(key, value);
        }
        Ok(request)
    }

    fn raw(&self, key: &'static str) -> Result<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .ok_or(CalcError::MissingParam {
                feature: self.feature.name(),
                param: key,
            })
    }

    fn float(&self, key: &'static str) -> Result<f64> {
        let raw = self.raw(key)?;
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(key, raw)),
        }
    }

    /// Integers also accept a decimal, truncated toward zero.
    fn int(&self, key: &'static str) -> Result<i64> {
        let raw = self.raw(key)?;
        let trimmed = raw.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Ok(v);
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v.trunc() as i64),
            _ => Err(invalid(key, raw)),
        }
    }
}

/// What a handled request produced. `result` is `Value::Null` when the
/// operation had no defined result.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub feature: Feature,
    pub result: Value,
}

impl Outcome {
    pub fn is_defined(&self) -> bool {
        !self.result.is_null()
    }
}

/// Runs one request and logs it to `session`. Faults are returned and leave
/// the history untouched.
pub fn handle(session: &mut Session, request: &Request) -> Result<Outcome> {
    debug!(feature = %request.feature, params = ?request.params, "dispatching request");
    let (input, result) = substitute_ans(session, request)
        .and_then(|resolved| compute(&resolved))
        .inspect_err(|e| {
            warn!(feature = %request.feature, error = %e, "request rejected");
        })?;
    session.record(request.feature.label(), input, result.clone());
    Ok(Outcome {
        feature: request.feature,
        result,
    })
}

/// Replaces every `ans` parameter value with the last numeric result.
fn substitute_ans(session: &Session, request: &Request) -> Result<Request> {
    let mut resolved = request.clone();
    for (key, value) in resolved.params.iter_mut() {
        if !value.trim().eq_ignore_ascii_case("ans") {
            continue;
        }
        let last = session
            .last_result()
            .and_then(Value::as_f64)
            .ok_or_else(|| CalcError::NoPreviousResult { param: key.clone() })?;
        *value = last.to_string();
    }
    Ok(resolved)
}

/// Computes `(input, result)` for a request without logging it.
pub fn compute(request: &Request) -> Result<(Value, Value)> {
    match request.feature {
        Feature::Basic => basic(request),
        Feature::Scientific => scientific(request),
        Feature::Converter => converter(request),
        Feature::Base => base(request),
        Feature::Sequence => generate(request),
        Feature::Stats => statistics(request),
        Feature::GcdLcm => gcd_lcm(request),
        Feature::Prime => prime(request),
    }
}

fn basic(req: &Request) -> Result<(Value, Value)> {
    let a = req.float("a")?;
    let b = req.float("b")?;
    let op = req.raw("op")?;
    let result = match op {
        "add" => Some(arith::add(a, b)),
        "sub" => Some(arith::sub(a, b)),
        "mul" => Some(arith::mul(a, b)),
        "div" => arith::div(a, b),
        "mod" => arith::modulo(a, b),
        "pow" => Some(arith::pow(a, b)),
        other => return Err(unknown_op(req.feature, other)),
    };
    Ok((json!({ "a": a, "b": b, "op": op }), number(result)))
}

fn scientific(req: &Request) -> Result<(Value, Value)> {
    let sop = req.raw("sop")?;
    let val = req.float("val")?;
    let result = match sop {
        "sqrt" => arith::sqrt(val),
        "factorial" => arith::factorial(val.trunc() as i64),
        other => return Err(unknown_op(req.feature, other)),
    };
    Ok((json!({ "sop": sop, "val": val }), number(result)))
}

fn converter(req: &Request) -> Result<(Value, Value)> {
    let ctype = req.raw("ctype")?;
    let v = req.float("v")?;
    let result = match ctype {
        "c2f" => convert::celsius_to_fahrenheit(v),
        "f2c" => convert::fahrenheit_to_celsius(v),
        "m2f" => convert::meters_to_feet(v),
        "f2m" => convert::feet_to_meters(v),
        "k2l" => convert::kg_to_lbs(v),
        "l2k" => convert::lbs_to_kg(v),
        other => return Err(unknown_op(req.feature, other)),
    };
    Ok((json!({ "type": ctype, "val": v }), Value::from(result)))
}

fn base(req: &Request) -> Result<(Value, Value)> {
    let digits = req.raw("number")?;
    let from = req.int("from")?;
    let to = req.int("to")?;
    // out-of-range radixes are an undefined result, not a fault
    let radix = |r: i64| u32::try_from(r).unwrap_or(0);
    let result = convert::base_convert(digits, radix(from), radix(to));
    Ok((
        json!({ "number": digits, "from": from, "to": to }),
        result.map(Value::from).unwrap_or(Value::Null),
    ))
}

fn generate(req: &Request) -> Result<(Value, Value)> {
    let stype = req.raw("stype")?;
    let n = req.int("n")?;
    if n > MAX_SEQUENCE_TERMS as i64 {
        return Err(CalcError::TooLarge {
            param: "n",
            value: n,
            limit: MAX_SEQUENCE_TERMS,
        });
    }
    let n = n.max(0) as usize;
    let result: Value = match stype {
        "fib" => sequence::fibonacci(n).into_iter().map(wide_int).collect(),
        "arith" => sequence::arithmetic(n, req.float("start")?, req.float("diff")?).into(),
        "geom" => sequence::geometric(n, req.float("start")?, req.float("ratio")?).into(),
        other => return Err(unknown_op(req.feature, other)),
    };
    Ok((json!(req.params), result))
}

fn statistics(req: &Request) -> Result<(Value, Value)> {
    let raw = req.raw("values")?;
    let values = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid("values", s)),
        })
        .collect::<Result<Vec<f64>>>()?;
    let summary = stats::Summary::of(&values);
    Ok((json!(values), serde_json::to_value(summary)?))
}

fn gcd_lcm(req: &Request) -> Result<(Value, Value)> {
    let i1 = req.int("i1")?;
    let i2 = req.int("i2")?;
    let result = json!({
        "gcd": arith::gcd(i1, i2),
        "lcm": wide_int(arith::lcm(i1, i2)),
    });
    Ok((json!([i1, i2]), result))
}

fn prime(req: &Request) -> Result<(Value, Value)> {
    let p = req.int("p")?;
    Ok((json!({ "n": p }), Value::Bool(arith::is_prime(p))))
}

/// Non-finite values have no JSON form and log as `null`.
fn number(v: Option<f64>) -> Value {
    v.map(Value::from).unwrap_or(Value::Null)
}

/// Integers wider than `u64` are logged as the nearest `f64`.
fn wide_int(n: u128) -> Value {
    u64::try_from(n)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(n as f64))
}

fn invalid(param: &str, value: &str) -> CalcError {
    CalcError::InvalidNumber {
        param: param.to_string(),
        value: value.to_string(),
    }
}

fn unknown_op(feature: Feature, op: &str) -> CalcError {
    CalcError::UnknownOperation {
        feature: feature.name(),
        op: op.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(words: &[&str]) -> Result<Value> {
        let mut session = Session::new();
        let request = Request::from_words(words)?;
        handle(&mut session, &request).map(|o| o.result)
    }

    #[test]
    fn test_feature_lookup() {
        assert_eq!("basic".parse::<Feature>().unwrap(), Feature::Basic);
        assert_eq!("GCDLCM".parse::<Feature>().unwrap(), Feature::GcdLcm);
        assert!(matches!("nope".parse::<Feature>(), Err(CalcError::UnknownFeature(_))));
        for f in Feature::ALL {
            assert_eq!(f.name().parse::<Feature>().unwrap(), f);
        }
    }

    #[test]
    fn test_basic() {
        assert_eq!(run(&["basic", "a=1", "b=2", "op=add"]).unwrap(), json!(3.0));
        assert_eq!(run(&["basic", "a=7", "b=2", "op=mod"]).unwrap(), json!(1.0));
        assert_eq!(run(&["basic", "a=2", "b=3", "op=pow"]).unwrap(), json!(8.0));
        assert_eq!(run(&["basic", "a=1", "b=0", "op=div"]).unwrap(), Value::Null);
    }

    #[test]
    fn test_undefined_result_is_logged() {
        let mut session = Session::new();
        let req = Request::new(Feature::Basic).param("a", "1").param("b", "0").param("op", "div");
        let outcome = handle(&mut session, &req).unwrap();
        assert!(!outcome.is_defined());
        let rec = session.history().latest().unwrap();
        assert_eq!(rec.feature, "Basic");
        assert_eq!(rec.input, json!({ "a": 1.0, "b": 0.0, "op": "div" }));
        assert!(rec.is_failure());
    }

    #[test]
    fn test_faults_are_not_logged() {
        let mut session = Session::new();
        let missing = Request::new(Feature::Basic).param("a", "1");
        assert!(matches!(
            handle(&mut session, &missing),
            Err(CalcError::MissingParam { param: "b", .. })
        ));
        let bad = Request::new(Feature::Prime).param("p", "seven");
        assert!(matches!(handle(&mut session, &bad), Err(CalcError::InvalidNumber { .. })));
        let unknown = Request::new(Feature::Basic).param("a", "1").param("b", "1").param("op", "xor");
        assert!(matches!(handle(&mut session, &unknown), Err(CalcError::UnknownOperation { .. })));
        let inf = Request::new(Feature::Converter).param("ctype", "c2f").param("v", "inf");
        assert!(handle(&mut session, &inf).is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_scientific() {
        assert_eq!(run(&["scientific", "sop=sqrt", "val=9"]).unwrap(), json!(3.0));
        assert_eq!(run(&["scientific", "sop=sqrt", "val=-9"]).unwrap(), Value::Null);
        assert_eq!(run(&["scientific", "sop=factorial", "val=5.9"]).unwrap(), json!(120.0));
        assert_eq!(run(&["scientific", "sop=factorial", "val=-1"]).unwrap(), Value::Null);
    }

    #[test]
    fn test_converter() {
        assert_eq!(run(&["converter", "ctype=c2f", "v=100"]).unwrap(), json!(212.0));
        assert_eq!(run(&["converter", "ctype=f2c", "v=32"]).unwrap(), json!(0.0));
        assert!(run(&["converter", "ctype=k2l", "v=1"]).unwrap().is_number());
    }

    #[test]
    fn test_base() {
        assert_eq!(run(&["base", "number=255", "from=10", "to=16"]).unwrap(), json!("ff"));
        assert_eq!(run(&["base", "number=12", "from=10", "to=99"]).unwrap(), Value::Null);
        assert_eq!(run(&["base", "number=12", "from=-2", "to=2"]).unwrap(), Value::Null);
    }

    #[test]
    fn test_sequence() {
        assert_eq!(run(&["sequence", "stype=fib", "n=7"]).unwrap(), json!([0, 1, 1, 2, 3, 5, 8]));
        assert_eq!(run(&["sequence", "stype=fib", "n=-3"]).unwrap(), json!([]));
        assert_eq!(
            run(&["sequence", "stype=geom", "n=4", "start=2", "ratio=3"]).unwrap(),
            json!([2.0, 6.0, 18.0, 54.0])
        );
        assert_eq!(
            run(&["sequence", "stype=arith", "n=3", "start=1", "diff=2"]).unwrap(),
            json!([1.0, 3.0, 5.0])
        );
        assert!(matches!(
            run(&["sequence", "stype=arith", "n=3", "start=1"]),
            Err(CalcError::MissingParam { param: "diff", .. })
        ));
        assert!(matches!(
            run(&["sequence", "stype=fib", "n=10001"]),
            Err(CalcError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_sequence_echoes_raw_params() {
        let mut session = Session::new();
        let req = Request::from_words(&["sequence", "stype=fib", "n=3"]).unwrap();
        handle(&mut session, &req).unwrap();
        let rec = session.history().latest().unwrap();
        assert_eq!(rec.input, json!({ "n": "3", "stype": "fib" }));
    }

    #[test]
    fn test_stats() {
        assert_eq!(
            run(&["stats", "values=10, 20 30"]).unwrap(),
            json!({ "mean": 20.0, "variance": 200.0 / 3.0, "stddev": (200.0_f64 / 3.0).sqrt() })
        );
        assert_eq!(
            run(&["stats", "values="]).unwrap(),
            json!({ "mean": null, "variance": null, "stddev": null })
        );
        assert!(matches!(run(&["stats", "values=1,x"]), Err(CalcError::InvalidNumber { .. })));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(run(&["gcdlcm", "i1=12", "i2=18"]).unwrap(), json!({ "gcd": 6, "lcm": 36 }));
        assert_eq!(run(&["gcdlcm", "i1=0", "i2=0"]).unwrap(), json!({ "gcd": 0, "lcm": 0 }));
        let wide = run(&["gcdlcm", "i1=9223372036854775807", "i2=9223372036854775806"]).unwrap();
        assert!(wide["lcm"].is_f64());
    }

    #[test]
    fn test_prime() {
        assert_eq!(run(&["prime", "p=13"]).unwrap(), json!(true));
        assert_eq!(run(&["prime", "p=15"]).unwrap(), json!(false));
        assert_eq!(run(&["prime", "p=1"]).unwrap(), json!(false));
    }

    #[test]
    fn test_ans_takes_last_numeric_result() {
        let mut session = Session::new();
        let first = Request::from_words(&["basic", "a=6", "b=7", "op=mul"]).unwrap();
        handle(&mut session, &first).unwrap();
        // an undefined result leaves `ans` alone
        let undefined = Request::from_words(&["basic", "a=1", "b=0", "op=div"]).unwrap();
        handle(&mut session, &undefined).unwrap();

        let next = Request::from_words(&["basic", "a=ans", "b=2", "op=add"]).unwrap();
        let outcome = handle(&mut session, &next).unwrap();
        assert_eq!(outcome.result, json!(44.0));
        let rec = session.history().latest().unwrap();
        assert_eq!(rec.input, json!({ "a": 42.0, "b": 2.0, "op": "add" }));
    }

    #[test]
    fn test_ans_without_numeric_result_is_fault() {
        let mut session = Session::new();
        let req = Request::from_words(&["prime", "p=ans"]).unwrap();
        assert!(matches!(
            handle(&mut session, &req),
            Err(CalcError::NoPreviousResult { .. })
        ));
        handle(&mut session, &Request::from_words(&["prime", "p=7"]).unwrap()).unwrap();
        assert!(matches!(
            handle(&mut session, &req),
            Err(CalcError::NoPreviousResult { .. })
        ));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_from_words_rejects_malformed() {
        assert!(matches!(
            Request::from_words(&["prime", "13"]),
            Err(CalcError::MalformedArgument(_))
        ));
        let empty: [&str; 0] = [];
        assert!(Request::from_words(&empty).is_err());
    }
}
