//! The conformal 5-basis metric, the default bilinear form used to
//! evaluate inner products.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// `(symbol_a, symbol_b) -> scalar | None`, the dependency the inner-product
/// handler needs to collapse two vector atoms into a scalar.
pub type BilinearForm<'a> = dyn Fn(&str, &str) -> Option<f64> + 'a;

lazy_static! {
  static ref CONFORMAL_BILINEAR_FORM_MAP: HashMap<&'static str, f64> = {
    let mut m = HashMap::new();
    m.insert("e1.e1", 1.0);
    m.insert("e1.e2", 0.0);
    m.insert("e1.e3", 0.0);
    m.insert("e1.no", 0.0);
    m.insert("e1.ni", 0.0);

    m.insert("e2.e1", 0.0);
    m.insert("e2.e2", 1.0);
    m.insert("e2.e3", 0.0);
    m.insert("e2.no", 0.0);
    m.insert("e2.ni", 0.0);

    m.insert("e3.e1", 0.0);
    m.insert("e3.e2", 0.0);
    m.insert("e3.e3", 1.0);
    m.insert("e3.no", 0.0);
    m.insert("e3.ni", 0.0);

    m.insert("no.e1", 0.0);
    m.insert("no.e2", 0.0);
    m.insert("no.e3", 0.0);
    m.insert("no.no", 0.0);
    m.insert("no.ni", -1.0);

    m.insert("ni.e1", 0.0);
    m.insert("ni.e2", 0.0);
    m.insert("ni.e3", 0.0);
    m.insert("ni.no", -1.0);
    m.insert("ni.ni", 0.0);
    m
  };
}

/// The default 3D conformal metric: diagonal unit `e1,e2,e3`, null
/// `no`/`ni` with `no.ni = ni.no = -1`, and any `e*` orthogonal to `no`/`ni`.
/// Any other pair (e.g. two distinct symbolic vectors with no known
/// relationship) defers by returning `None`.
pub fn conformal_bilinear_form(a: &str, b: &str) -> Option<f64> {
  let key = format!("{}.{}", a, b);
  if let Some(&v) = CONFORMAL_BILINEAR_FORM_MAP.get(key.as_str()) {
    return Some(v);
  }
  if (a == "no" || a == "ni") && b.starts_with('e') {
    return Some(0.0);
  }
  if (b == "no" || b == "ni") && a.starts_with('e') {
    return Some(0.0);
  }
  None
}
