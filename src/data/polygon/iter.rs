use crate::data::Point;

pub struct Iter<'a> {
  pub(crate) iter: std::slice::Iter<'a, Point<2>>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = &'a Point<2>;
  fn next(&mut self) -> Option<&'a Point<2>> {
    self.iter.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.iter.size_hint()
  }
}

impl ExactSizeIterator for Iter<'_> {}

impl DoubleEndedIterator for Iter<'_> {
  fn next_back(&mut self) -> Option<Self::Item> {
    self.iter.next_back()
  }
}

pub struct IterMut<'a> {
  pub(crate) points: std::slice::IterMut<'a, Point<2>>,
}

impl<'a> Iterator for IterMut<'a> {
  type Item = &'a mut Point<2>;
  fn next(&mut self) -> Option<&'a mut Point<2>> {
    self.points.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.points.size_hint()
  }
}

impl ExactSizeIterator for IterMut<'_> {}
