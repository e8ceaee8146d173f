use std::{
    any::{Any, TypeId},
    fmt,
    marker::PhantomData,
};

use fxhash::FxHashMap;

use super::{NodeId, Tree};
use crate::Result;

/// Typed key for per-node user data. Keys with the same name and value type are the same key.
pub struct Key<T> {
    name:    &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: 'static> Key<T> {
    fn id(&self) -> KeyId {
        (TypeId::of::<T>(), self.name)
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.name)
    }
}

type KeyId = (TypeId, &'static str);

/// A user data value that survives [`Tree::deep_clone`].
pub trait CopyableValue: Any + Send + Sync + fmt::Debug {
    fn clone_value(&self) -> Box<dyn CopyableValue>;
    fn as_any(&self) -> &dyn Any;
}

impl<T> CopyableValue for T
where
    T: Clone + Any + Send + Sync + fmt::Debug,
{
    fn clone_value(&self) -> Box<dyn CopyableValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Default)]
pub(crate) struct UserData {
    scratch:  Option<Box<FxHashMap<KeyId, Box<dyn Any + Send + Sync>>>>,
    copyable: Option<Box<FxHashMap<KeyId, Box<dyn CopyableValue>>>>,
}

impl UserData {
    pub(crate) fn copy_copyable(&self) -> UserData {
        let copyable = self.copyable.as_ref().map(|map| {
            Box::new(
                map.iter()
                    .map(|(key, value)| (*key, (**value).clone_value()))
                    .collect::<FxHashMap<_, _>>(),
            )
        });
        UserData {
            scratch: None,
            copyable,
        }
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scratch = self.scratch.as_ref().map_or(0, |map| map.len());
        let copyable = self.copyable.as_ref().map_or(0, |map| map.len());
        f.debug_struct("UserData")
            .field("scratch", &scratch)
            .field("copyable", &copyable)
            .finish()
    }
}

impl Tree {
    /// Attaches non-copyable data. It is not carried over by [`Tree::deep_clone`].
    pub fn put_user_data<T>(&mut self, id: NodeId, key: &Key<T>, value: T) -> Result<()>
    where
        T: Any + Send + Sync,
    {
        let data = &mut self.data_mut(id)?.user_data;
        data.scratch.get_or_insert_with(Default::default).insert(key.id(), Box::new(value));
        Ok(())
    }

    pub fn user_data<T: Any + Send + Sync>(&self, id: NodeId, key: &Key<T>) -> Option<&T> {
        self.data(id)
            .user_data
            .scratch
            .as_ref()?
            .get(&key.id())?
            .downcast_ref()
    }

    pub fn remove_user_data<T: Any + Send + Sync>(&mut self, id: NodeId, key: &Key<T>) -> Result<Option<T>> {
        let data = &mut self.data_mut(id)?.user_data;
        let value = data.scratch.as_mut().and_then(|map| map.remove(&key.id()));
        Ok(value.and_then(|value| value.downcast().ok()).map(|value| *value))
    }

    /// Attaches data that is copied along with the node by [`Tree::deep_clone`].
    pub fn put_copyable_user_data<T>(&mut self, id: NodeId, key: &Key<T>, value: T) -> Result<()>
    where
        T: Clone + Any + Send + Sync + fmt::Debug,
    {
        let data = &mut self.data_mut(id)?.user_data;
        data.copyable
            .get_or_insert_with(Default::default)
            .insert(key.id(), Box::new(value));
        Ok(())
    }

    pub fn copyable_user_data<T>(&self, id: NodeId, key: &Key<T>) -> Option<&T>
    where
        T: Clone + Any + Send + Sync + fmt::Debug,
    {
        self.data(id)
            .user_data
            .copyable
            .as_ref()?
            .get(&key.id())
            .map(|value| (**value).as_any())?
            .downcast_ref()
    }

    pub fn remove_copyable_user_data<T>(&mut self, id: NodeId, key: &Key<T>) -> Result<bool>
    where
        T: Clone + Any + Send + Sync + fmt::Debug,
    {
        let data = &mut self.data_mut(id)?.user_data;
        Ok(data
            .copyable
            .as_mut()
            .map_or(false, |map| map.remove(&key.id()).is_some()))
    }
}
