/// A dense grid stored row by row, so `x` varies fastest when iterating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vec2D<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Vec2D<T> {
    pub fn new(width: usize, height: usize) -> Self
    where
        T: Default + Clone,
    {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data.fill(value);
    }
}
